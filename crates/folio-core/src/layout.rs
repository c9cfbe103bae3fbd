//! Headless block layout.
//!
//! Just enough of CSS flow to give every element a page-coordinate frame:
//! vertical stacking, responsive grids, fixed-height leaves and fixed-position
//! overlays. Scroll triggers and anchor navigation read these frames.

use folio_ui_graphics::Rect;

use crate::document::{DocumentInner, ElementId};

const SM: f32 = 640.0;
const MD: f32 = 768.0;
const LG: f32 = 1024.0;

/// Responsive column counts, mirroring the `sm`/`md`/`lg` breakpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Columns {
    pub base: usize,
    pub sm: usize,
    pub md: usize,
    pub lg: usize,
}

impl Columns {
    pub fn uniform(count: usize) -> Self {
        Self {
            base: count,
            sm: count,
            md: count,
            lg: count,
        }
    }

    pub fn responsive(base: usize, sm: usize, lg: usize) -> Self {
        Self {
            base,
            sm,
            md: sm,
            lg,
        }
    }

    pub fn for_width(&self, width: f32) -> usize {
        let count = if width >= LG {
            self.lg
        } else if width >= MD {
            self.md
        } else if width >= SM {
            self.sm
        } else {
            self.base
        };
        count.max(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    /// Leaf with an intrinsic height; children overlay it from the top.
    Fixed { height: f32 },
    /// Children stacked vertically. `min_viewport_fraction` of 1.0 makes the
    /// element at least one screen tall.
    Column {
        gap: f32,
        padding: f32,
        min_viewport_fraction: f32,
    },
    Grid {
        columns: Columns,
        gap: f32,
        padding: f32,
    },
    /// Fixed-position layer covering the viewport, outside the normal flow.
    Overlay,
}

impl Layout {
    pub fn fixed(height: f32) -> Self {
        Layout::Fixed { height }
    }

    pub fn column() -> Self {
        Layout::Column {
            gap: 0.0,
            padding: 0.0,
            min_viewport_fraction: 0.0,
        }
    }

    pub fn stack(gap: f32, padding: f32) -> Self {
        Layout::Column {
            gap,
            padding,
            min_viewport_fraction: 0.0,
        }
    }

    pub fn screen() -> Self {
        Layout::Column {
            gap: 0.0,
            padding: 0.0,
            min_viewport_fraction: 1.0,
        }
    }

    pub fn grid(columns: Columns, gap: f32) -> Self {
        Layout::Grid {
            columns,
            gap,
            padding: 0.0,
        }
    }

    fn in_flow(&self) -> bool {
        !matches!(self, Layout::Overlay)
    }
}

pub(crate) fn compute(doc: &mut DocumentInner) -> f32 {
    let root = doc.root;
    let width = doc.viewport.width;
    place(doc, root, 0.0, 0.0, width)
}

fn place(doc: &mut DocumentInner, id: ElementId, x: f32, y: f32, width: f32) -> f32 {
    let (layout, hidden, children) = match doc.get(id) {
        Ok(data) => (data.layout, data.hidden, data.children.clone()),
        Err(_) => return 0.0,
    };
    if hidden {
        set_frame(doc, id, Rect { x, y, width, height: 0.0 });
        return 0.0;
    }
    let viewport = doc.viewport;
    let height = match layout {
        Layout::Fixed { height } => {
            stack_children(doc, &children, x, y, width, 0.0);
            height
        }
        Layout::Column {
            gap,
            padding,
            min_viewport_fraction,
        } => {
            let content = stack_children(doc, &children, x + padding, y + padding, width - 2.0 * padding, gap);
            (content + 2.0 * padding).max(min_viewport_fraction * viewport.height)
        }
        Layout::Grid {
            columns,
            gap,
            padding,
        } => {
            let content = grid_children(
                doc,
                &children,
                x + padding,
                y + padding,
                width - 2.0 * padding,
                columns.for_width(viewport.width),
                gap,
            );
            content + 2.0 * padding
        }
        Layout::Overlay => {
            stack_children(doc, &children, 0.0, 0.0, viewport.width, 0.0);
            set_frame(
                doc,
                id,
                Rect {
                    x: 0.0,
                    y: 0.0,
                    width: viewport.width,
                    height: viewport.height,
                },
            );
            return 0.0;
        }
    };
    set_frame(doc, id, Rect { x, y, width, height });
    height
}

fn stack_children(
    doc: &mut DocumentInner,
    children: &[ElementId],
    x: f32,
    y: f32,
    width: f32,
    gap: f32,
) -> f32 {
    let mut cursor = y;
    let mut placed = 0usize;
    for child in children {
        let in_flow = doc
            .get(*child)
            .map(|data| data.layout.in_flow() && !data.hidden)
            .unwrap_or(false);
        if !in_flow {
            place(doc, *child, x, y, width);
            continue;
        }
        if placed > 0 {
            cursor += gap;
        }
        cursor += place(doc, *child, x, cursor, width);
        placed += 1;
    }
    cursor - y
}

fn grid_children(
    doc: &mut DocumentInner,
    children: &[ElementId],
    x: f32,
    y: f32,
    width: f32,
    columns: usize,
    gap: f32,
) -> f32 {
    let cell_width = ((width - gap * (columns as f32 - 1.0)) / columns as f32).max(0.0);
    let flow: Vec<ElementId> = children
        .iter()
        .copied()
        .filter(|child| {
            doc.get(*child)
                .map(|data| data.layout.in_flow() && !data.hidden)
                .unwrap_or(false)
        })
        .collect();
    let mut cursor = y;
    for (row_index, row) in flow.chunks(columns).enumerate() {
        if row_index > 0 {
            cursor += gap;
        }
        let mut row_height = 0.0f32;
        for (column, child) in row.iter().enumerate() {
            let cell_x = x + column as f32 * (cell_width + gap);
            row_height = row_height.max(place(doc, *child, cell_x, cursor, cell_width));
        }
        cursor += row_height;
    }
    cursor - y
}

fn set_frame(doc: &mut DocumentInner, id: ElementId, frame: Rect) {
    if let Ok(data) = doc.get_mut(id) {
        data.frame = frame;
    }
}
