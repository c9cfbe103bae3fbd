//! One-shot completion signal.
//!
//! [`CompletionSender::fire`] consumes the sender, so a signal can be
//! delivered at most once no matter how often the code holding it runs.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("completion sender dropped without firing")]
pub struct Canceled;

#[derive(Default)]
struct Shared {
    fired: bool,
    sender_dropped: bool,
    waker: Option<Waker>,
}

pub struct CompletionSender {
    shared: Rc<RefCell<Shared>>,
}

pub struct CompletionFuture {
    shared: Rc<RefCell<Shared>>,
}

/// Creates a connected sender/future pair.
pub fn completion() -> (CompletionSender, CompletionFuture) {
    let shared = Rc::new(RefCell::new(Shared::default()));
    (
        CompletionSender {
            shared: Rc::clone(&shared),
        },
        CompletionFuture { shared },
    )
}

impl CompletionSender {
    pub fn fire(self) {
        let waker = {
            let mut shared = self.shared.borrow_mut();
            shared.fired = true;
            shared.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl Drop for CompletionSender {
    fn drop(&mut self) {
        let waker = {
            let mut shared = self.shared.borrow_mut();
            shared.sender_dropped = true;
            if shared.fired {
                None
            } else {
                shared.waker.take()
            }
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl CompletionFuture {
    pub fn is_fired(&self) -> bool {
        self.shared.borrow().fired
    }
}

impl Future for CompletionFuture {
    type Output = Result<(), Canceled>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut shared = self.shared.borrow_mut();
        if shared.fired {
            Poll::Ready(Ok(()))
        } else if shared.sender_dropped {
            Poll::Ready(Err(Canceled))
        } else {
            shared.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll_once(future: &mut CompletionFuture) -> Poll<Result<(), Canceled>> {
        let waker = futures_task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        Pin::new(future).poll(&mut cx)
    }

    #[test]
    fn future_resolves_after_fire() {
        let (sender, mut future) = completion();
        assert!(poll_once(&mut future).is_pending());
        sender.fire();
        assert_eq!(poll_once(&mut future), Poll::Ready(Ok(())));
    }

    #[test]
    fn dropped_sender_cancels() {
        let (sender, mut future) = completion();
        drop(sender);
        assert_eq!(poll_once(&mut future), Poll::Ready(Err(Canceled)));
    }
}
