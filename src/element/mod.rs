//! The element tree.
//!
//! [`Element`] is the single node type of the toolkit. Its behavior comes
//! from a closed set of kinds (flow, grid, list, text, image); its box
//! styling comes from [`Style`]; its answers to sizing questions are memoized
//! in a per-element [`LayoutCache`].
//!
//! # Sizing protocol
//!
//! A parent asks each child three questions, always against a proposed
//! parent size: [`Element::min_size`] (the smallest acceptable footprint),
//! [`Element::max_size`] (the ideal footprint), and [`Element::render_size`]
//! (the real footprint inside the space actually granted). Each answer is
//! cached in its own slot keyed by the proposed size, so re-asking is free
//! until something changes and asking at a new size recomputes exactly once.
//!
//! # Change notification
//!
//! Elements own their children, so children cannot point back at parents
//! with strong references. Instead every element carries a shared
//! [`InvalidationNode`] and children keep weak uplinks to their parents'
//! nodes. Any mutation clears the element's own cache and walks the uplinks,
//! clearing every ancestor's cache on the way; the next sizing query then
//! recomputes the stale path and nothing else. Uplinks to dropped parents
//! upgrade to `None` and are ignored.
//!
//! # Rendering
//!
//! [`Element::render`] draws the tree into a [`Canvas`] in one synchronous
//! pass: background, border, then kind-specific content and children in
//! ascending `z_index` order, everything clipped to the granted region. The
//! draw pass reuses the render-phase cache entries warmed while sizing, so a
//! frame computes each element's layout once.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::thread;

use tracing::trace;

use crate::canvas::Canvas;
use crate::error::LayoutError;
use crate::geometry::{Dimension, Rect, Size};
use crate::layout::{
    CachedLayout, ChildrenLayout, ElementLayout, GridArea, LayoutCache, Phase, TrackList,
};
use crate::style::Style;
use crate::text::Typesetter;
use crate::types::{Direction, HAlign, Position};

mod flow;
mod grid;
mod image;
mod list;
mod text;

pub use self::image::Bitmap;
pub use self::list::ListMarker;

use self::flow::FlowBox;
use self::grid::GridBox;
use self::image::ImageBlock;
use self::list::ListBox;
use self::text::TextBlock;

// =============================================================================
// Invalidation
// =============================================================================

/// The cache-and-uplink half of an element, shared behind an `Rc` so that
/// children can reach their ancestors without owning them.
#[derive(Debug, Default)]
pub(crate) struct InvalidationNode {
    cache: RefCell<LayoutCache>,
    parents: RefCell<Vec<Weak<InvalidationNode>>>,
}

impl InvalidationNode {
    /// Drop all cached layouts here and in every reachable ancestor.
    ///
    /// Propagation is unconditional: an ancestor may hold a valid entry
    /// even when this node's cache is already empty.
    fn invalidate(&self) {
        self.cache.borrow_mut().clear();
        for parent in self.parents.borrow().iter().filter_map(Weak::upgrade) {
            parent.invalidate();
        }
    }
}

// =============================================================================
// Element kinds
// =============================================================================

#[derive(Debug)]
pub(crate) enum ElementKind {
    Flow(FlowBox),
    Grid(GridBox),
    List(ListBox),
    Text(TextBlock),
    Image(ImageBlock),
}

impl ElementKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Flow(_) => "flow",
            Self::Grid(_) => "grid",
            Self::List(_) => "list",
            Self::Text(_) => "text",
            Self::Image(_) => "image",
        }
    }

    fn children(&self) -> &[Element] {
        match self {
            Self::Flow(flow) => &flow.children,
            Self::Grid(grid) => &grid.children,
            Self::List(list) => &list.children,
            Self::Text(_) | Self::Image(_) => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match self {
            Self::Flow(flow) => Some(&mut flow.children),
            Self::Grid(grid) => Some(&mut grid.children),
            Self::List(list) => Some(&mut list.children),
            Self::Text(_) | Self::Image(_) => None,
        }
    }
}

// =============================================================================
// Element
// =============================================================================

/// A node in the user interface tree.
pub struct Element {
    kind: ElementKind,
    style: Style,
    node: Rc<InvalidationNode>,
    on_render: Option<Box<dyn Fn(Size) + Send + Sync>>,
}

impl Element {
    // =========================================================================
    // Constructors
    // =========================================================================

    fn with_kind(kind: ElementKind, style: Style) -> Self {
        Self {
            kind,
            style,
            node: Rc::new(InvalidationNode::default()),
            on_render: None,
        }
    }

    /// A stacking container laying children out along `direction`.
    pub fn flow(direction: Direction) -> Self {
        Self::with_kind(
            ElementKind::Flow(FlowBox::new(direction)),
            Style::flow_default(),
        )
    }

    /// A grid container with the given column and row tracks.
    ///
    /// Fails with [`LayoutError::EmptyTracks`] when either axis is empty;
    /// a constructed grid always has somewhere to place children.
    pub fn grid(columns: Vec<Dimension>, rows: Vec<Dimension>) -> Result<Self, LayoutError> {
        let kind = ElementKind::Grid(GridBox::new(TrackList::new(columns)?, TrackList::new(rows)?));
        Ok(Self::with_kind(kind, Style::grid_default()))
    }

    /// A vertical list with a marker gutter.
    pub fn list(marker: ListMarker) -> Self {
        Self::with_kind(
            ElementKind::List(ListBox::new(marker)),
            Style::list_default(),
        )
    }

    /// A text leaf measured and wrapped by `typesetter`.
    pub fn text(content: impl Into<String>, typesetter: Rc<Typesetter>) -> Self {
        Self::with_kind(
            ElementKind::Text(TextBlock::new(content.into(), typesetter)),
            Style::text_default(),
        )
    }

    /// An image leaf drawing `bitmap` as colored cells.
    pub fn image(bitmap: Bitmap) -> Self {
        Self::with_kind(
            ElementKind::Image(ImageBlock::new(bitmap)),
            Style::image_default(),
        )
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The kind of this element, as a human-readable name.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Child elements, empty for leaves.
    pub fn children(&self) -> &[Element] {
        self.kind.children()
    }

    /// Lifetime count of layout computations, across all phases. Cache hits
    /// do not count; invalidation does not reset it.
    pub fn layout_count(&self) -> u64 {
        self.node.cache.borrow().computes()
    }

    pub(crate) fn is_absolute(&self) -> bool {
        self.style.position == Position::Absolute
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Edit the style in place and drop stale layouts here and above.
    pub fn update_style(&mut self, edit: impl FnOnce(&mut Style)) {
        edit(&mut self.style);
        self.invalidate();
    }

    /// Drop cached layouts on this element and every ancestor.
    ///
    /// Mutating methods call this automatically; it is public for content
    /// that changes behind the toolkit's back.
    pub fn invalidate(&self) {
        trace!(kind = self.kind.name(), "layout invalidated");
        self.node.invalidate();
    }

    /// Append a child to a container element.
    pub fn push_child(&mut self, child: Element) -> Result<(), LayoutError> {
        let index = self.children().len();
        self.insert_child(index, child)
    }

    /// Insert a child at `index`, shifting later children right.
    pub fn insert_child(&mut self, index: usize, child: Element) -> Result<(), LayoutError> {
        if self.kind.children_mut().is_none() {
            return Err(LayoutError::KindMismatch {
                expected: "container",
                actual: self.kind.name(),
            });
        }
        let len = self.children().len();
        if index > len {
            return Err(LayoutError::ChildOutOfBounds { index, len });
        }
        child
            .node
            .parents
            .borrow_mut()
            .push(Rc::downgrade(&self.node));
        if let Some(children) = self.kind.children_mut() {
            children.insert(index, child);
        }
        self.invalidate();
        Ok(())
    }

    /// Remove and return the child at `index`, severing its uplink.
    pub fn remove_child(&mut self, index: usize) -> Result<Element, LayoutError> {
        let len = self.children().len();
        let Some(children) = self.kind.children_mut() else {
            return Err(LayoutError::KindMismatch {
                expected: "container",
                actual: self.kind.name(),
            });
        };
        if index >= len {
            return Err(LayoutError::ChildOutOfBounds { index, len });
        }
        let child = children.remove(index);
        let node = Rc::clone(&self.node);
        child.node.parents.borrow_mut().retain(|uplink| {
            uplink
                .upgrade()
                .is_some_and(|parent| !Rc::ptr_eq(&parent, &node))
        });
        self.invalidate();
        Ok(child)
    }

    /// Mutable access to the child at `index`; style edits made through it
    /// notify this element the usual way.
    pub fn child_mut(&mut self, index: usize) -> Result<&mut Element, LayoutError> {
        let len = self.children().len();
        let actual = self.kind.name();
        let Some(children) = self.kind.children_mut() else {
            return Err(LayoutError::KindMismatch {
                expected: "container",
                actual,
            });
        };
        children
            .get_mut(index)
            .ok_or(LayoutError::ChildOutOfBounds { index, len })
    }

    /// Replace the content of a text element.
    pub fn set_text(&mut self, content: impl Into<String>) -> Result<(), LayoutError> {
        let ElementKind::Text(text) = &mut self.kind else {
            return Err(LayoutError::KindMismatch {
                expected: "text",
                actual: self.kind.name(),
            });
        };
        text.content = content.into();
        self.invalidate();
        Ok(())
    }

    /// Align the lines of a text element within its resolved width.
    pub fn set_text_align(&mut self, align: HAlign) -> Result<(), LayoutError> {
        let ElementKind::Text(text) = &mut self.kind else {
            return Err(LayoutError::KindMismatch {
                expected: "text",
                actual: self.kind.name(),
            });
        };
        text.align = align;
        self.invalidate();
        Ok(())
    }

    /// Set or clear the title band of a flow element.
    pub fn set_title(&mut self, title: Option<String>) -> Result<(), LayoutError> {
        let ElementKind::Flow(flow) = &mut self.kind else {
            return Err(LayoutError::KindMismatch {
                expected: "flow",
                actual: self.kind.name(),
            });
        };
        flow.title = title;
        self.invalidate();
        Ok(())
    }

    /// Change the marker of a list element.
    pub fn set_marker(&mut self, marker: ListMarker) -> Result<(), LayoutError> {
        let ElementKind::List(list) = &mut self.kind else {
            return Err(LayoutError::KindMismatch {
                expected: "list",
                actual: self.kind.name(),
            });
        };
        list.marker = marker;
        self.invalidate();
        Ok(())
    }

    /// Replace the bitmap of an image element.
    pub fn set_bitmap(&mut self, bitmap: Bitmap) -> Result<(), LayoutError> {
        let ElementKind::Image(image) = &mut self.kind else {
            return Err(LayoutError::KindMismatch {
                expected: "image",
                actual: self.kind.name(),
            });
        };
        image.bitmap = bitmap;
        self.invalidate();
        Ok(())
    }

    /// Pin a grid child to an explicit area of cells.
    ///
    /// The area is checked against this grid's tracks immediately, so a
    /// typo fails here and not three frames later.
    pub fn set_child_area(&mut self, index: usize, area: GridArea) -> Result<(), LayoutError> {
        let ElementKind::Grid(grid) = &mut self.kind else {
            return Err(LayoutError::KindMismatch {
                expected: "grid",
                actual: self.kind.name(),
            });
        };
        area.validate(grid.columns.count(), grid.rows.count())?;
        let len = grid.children.len();
        let child = grid
            .children
            .get_mut(index)
            .ok_or(LayoutError::ChildOutOfBounds { index, len })?;
        child.style.grid_area = Some(area);
        child.invalidate();
        Ok(())
    }

    /// Append a column track to a grid element.
    pub fn push_column(&mut self, track: Dimension) -> Result<(), LayoutError> {
        let ElementKind::Grid(grid) = &mut self.kind else {
            return Err(LayoutError::KindMismatch {
                expected: "grid",
                actual: self.kind.name(),
            });
        };
        grid.columns.push(track);
        self.invalidate();
        Ok(())
    }

    /// Append a row track to a grid element.
    pub fn push_row(&mut self, track: Dimension) -> Result<(), LayoutError> {
        let ElementKind::Grid(grid) = &mut self.kind else {
            return Err(LayoutError::KindMismatch {
                expected: "grid",
                actual: self.kind.name(),
            });
        };
        grid.rows.push(track);
        self.invalidate();
        Ok(())
    }

    /// Remove a column track from a grid element.
    ///
    /// The axis must keep at least one track. Children whose explicit areas
    /// referenced the removed track are clamped back into the table at the
    /// next layout.
    pub fn remove_column(&mut self, index: usize) -> Result<Dimension, LayoutError> {
        let ElementKind::Grid(grid) = &mut self.kind else {
            return Err(LayoutError::KindMismatch {
                expected: "grid",
                actual: self.kind.name(),
            });
        };
        let track = grid.columns.remove(index)?;
        self.invalidate();
        Ok(track)
    }

    /// Remove a row track from a grid element; limits as in
    /// [`Element::remove_column`].
    pub fn remove_row(&mut self, index: usize) -> Result<Dimension, LayoutError> {
        let ElementKind::Grid(grid) = &mut self.kind else {
            return Err(LayoutError::KindMismatch {
                expected: "grid",
                actual: self.kind.name(),
            });
        };
        let track = grid.rows.remove(index)?;
        self.invalidate();
        Ok(track)
    }

    /// Install a hook that runs on a scoped worker thread at the start of
    /// every render of this element. The render call joins it before
    /// returning; it observes the granted size but cannot change it.
    pub fn set_render_hook<F>(&mut self, hook: F)
    where
        F: Fn(Size) + Send + Sync + 'static,
    {
        self.on_render = Some(Box::new(hook));
    }

    pub fn clear_render_hook(&mut self) {
        self.on_render = None;
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    /// Smallest acceptable size inside a parent of size `parent`.
    pub fn min_size(&self, parent: Size) -> Size {
        self.size_for(Phase::Min, parent)
    }

    /// Ideal size inside a parent of size `parent`.
    pub fn max_size(&self, parent: Size) -> Size {
        self.size_for(Phase::Max, parent)
    }

    /// Actual size taken when granted `parent`.
    pub fn render_size(&self, parent: Size) -> Size {
        self.size_for(Phase::Render, parent)
    }

    /// Full box resolution for one phase: element size plus content and
    /// border rects relative to the element's own top-left corner.
    pub fn layout(&self, phase: Phase, parent: Size) -> ElementLayout {
        {
            let cache = self.node.cache.borrow();
            if let Some(entry) = cache.get(phase, parent) {
                return entry.layout;
            }
        }
        let entry = self.compute_entry(phase, parent);
        let layout = entry.layout;
        self.node.cache.borrow_mut().store(phase, entry);
        layout
    }

    /// Rects assigned to children for one phase, relative to this element's
    /// content box. Leaves return an empty list.
    pub fn children_layout(&self, phase: Phase, parent: Size) -> ChildrenLayout {
        self.layout(phase, parent);
        self.node
            .cache
            .borrow()
            .get(phase, parent)
            .map(|entry| entry.children.clone())
            .unwrap_or_default()
    }

    pub(crate) fn size_for(&self, phase: Phase, parent: Size) -> Size {
        self.layout(phase, parent).size
    }

    fn compute_entry(&self, phase: Phase, parent: Size) -> CachedLayout {
        let (layout, children) = match &self.kind {
            ElementKind::Flow(flow) => flow.compute(&self.style, phase, parent),
            ElementKind::Grid(grid) => grid.compute(&self.style, phase, parent),
            ElementKind::List(list) => list.compute(&self.style, phase, parent),
            ElementKind::Text(text) => (text.compute(&self.style, phase, parent), Vec::new()),
            ElementKind::Image(image) => (image.compute(&self.style, phase, parent), Vec::new()),
        };
        trace!(
            kind = self.kind.name(),
            ?phase,
            %parent,
            size = %layout.size,
            "layout computed"
        );
        CachedLayout {
            parent,
            layout,
            children,
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Draw this element and its subtree into `rect` on the canvas.
    ///
    /// Sizing runs first against `rect`'s size, so a resize since the last
    /// frame is picked up here without an explicit invalidation. Content
    /// that does not fit `rect` is clipped, never resized after the fact.
    pub fn render(&self, canvas: &mut Canvas, rect: Rect) {
        self.size_for(Phase::Render, rect.size());
        self.render_clipped(canvas, rect, Some(&rect));
    }

    pub(crate) fn render_clipped(&self, canvas: &mut Canvas, rect: Rect, clip: Option<&Rect>) {
        let entry = self.render_entry(rect.size());

        if let Some(hook) = &self.on_render {
            // joined implicitly: the frame waits for the worker
            thread::scope(|scope| {
                scope.spawn(|| hook(rect.size()));
            });
        }

        let layout = entry.layout;

        if !self.style.bg.is_transparent() {
            canvas.style_background(self.background_rect(&entry, rect), self.style.bg, clip);
        }
        if let Some(border) = layout.border_in(rect) {
            if let Some(style) = self.style.border {
                canvas.place_rect(border, style, self.style.border_color, clip);
            }
        }

        match &self.kind {
            ElementKind::Flow(flow) => {
                flow.draw(canvas, &self.style, &layout, rect, &entry.children, clip);
            }
            ElementKind::Grid(grid) => grid.draw(canvas, &layout, rect, &entry.children, clip),
            ElementKind::List(list) => {
                list.draw(canvas, &self.style, &layout, rect, &entry.children, clip);
            }
            ElementKind::Text(text) => text.draw(canvas, &self.style, &layout, rect, clip),
            ElementKind::Image(image) => image.draw(canvas, &layout, rect, clip),
        }
    }

    /// The render-phase entry for this draw call. The parent warmed the
    /// slot while granting sizes, and `render` warms it for the root, so
    /// the unkeyed read normally hits; a cold cache computes on the spot.
    fn render_entry(&self, parent: Size) -> CachedLayout {
        {
            let cache = self.node.cache.borrow();
            if let Some(entry) = cache.peek(Phase::Render) {
                return entry.clone();
            }
        }
        let entry = self.compute_entry(Phase::Render, parent);
        self.node
            .cache
            .borrow_mut()
            .store(Phase::Render, entry.clone());
        entry
    }

    /// Area the background paints: the border box, or content plus padding
    /// when borderless.
    fn background_rect(&self, entry: &CachedLayout, outer: Rect) -> Rect {
        match entry.layout.border_in(outer) {
            Some(border) => border,
            None => {
                let padding = self.style.padding.resolve(entry.parent);
                let content = entry.layout.content_in(outer);
                Rect::new(
                    content.x.saturating_sub(padding.left),
                    content.y.saturating_sub(padding.top),
                    content.width.saturating_add(padding.horizontal()),
                    content.height.saturating_add(padding.vertical()),
                )
            }
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind.name())
            .field("style", &self.style)
            .field("children", &self.children().len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Shared layout helpers
// =============================================================================

/// Intersect a drawing area with an optional clip.
pub(crate) fn merge_clip(area: Rect, clip: Option<&Rect>) -> Option<Rect> {
    match clip {
        Some(clip) => area.intersect(clip),
        None => Some(area),
    }
}

/// Stack in-flow children along `direction` inside `inner`, each queried at
/// the full remaining cross extent. Returns the aggregate content size and
/// one rect per child (absolute children are placed, not stacked).
pub(crate) fn stack_children(
    children: &[Element],
    phase: Phase,
    inner: Size,
    direction: Direction,
) -> (Size, ChildrenLayout) {
    let mut rects = vec![Rect::default(); children.len()];
    let mut main = 0u16;
    let mut cross = 0u16;

    for (i, child) in children.iter().enumerate() {
        if child.is_absolute() {
            continue;
        }
        let size = child.size_for(phase, inner);
        match direction {
            Direction::Vertical => {
                rects[i] = Rect::new(0, main, size.width, size.height);
                main = main.saturating_add(size.height);
                cross = cross.max(size.width);
            }
            Direction::Horizontal => {
                rects[i] = Rect::new(main, 0, size.width, size.height);
                main = main.saturating_add(size.width);
                cross = cross.max(size.height);
            }
        }
    }

    for (i, child) in children.iter().enumerate() {
        if child.is_absolute() {
            rects[i] = place_absolute(child, phase, inner);
        }
    }

    let content = match direction {
        Direction::Vertical => Size::new(cross, main),
        Direction::Horizontal => Size::new(main, cross),
    };
    (content, rects)
}

/// Rect for an absolutely positioned child: sized like any other child, but
/// offset from the content origin by its `left`/`top` styles and excluded
/// from the parent's content aggregation.
pub(crate) fn place_absolute(child: &Element, phase: Phase, inner: Size) -> Rect {
    let size = child.size_for(phase, inner);
    let x = child.style().left.resolve(inner.width).unwrap_or(0);
    let y = child.style().top.resolve(inner.height).unwrap_or(0);
    Rect::new(x, y, size.width, size.height)
}

/// Draw children into their assigned rects, clipped to the parent's content
/// box, back to front by `z_index` (declaration order breaks ties).
pub(crate) fn draw_children(
    canvas: &mut Canvas,
    children: &[Element],
    rects: &[Rect],
    content: Rect,
    clip: Option<&Rect>,
) {
    let Some(inner_clip) = merge_clip(content, clip) else {
        return;
    };

    let mut order: Vec<usize> = (0..children.len().min(rects.len())).collect();
    order.sort_by_key(|&i| children[i].style().z_index);

    for i in order {
        let rect = rects[i].translated(content.x, content.y);
        children[i].render_clipped(canvas, rect, Some(&inner_clip));
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use crate::types::Rgba;

    fn typesetter() -> Rc<Typesetter> {
        Rc::new(Typesetter::new())
    }

    fn fixed(width: u16, height: u16) -> Element {
        let mut el = Element::flow(Direction::Vertical);
        el.update_style(|s| {
            s.width = Dimension::Chars(width);
            s.height = Dimension::Chars(height);
        });
        el
    }

    #[test]
    fn test_leaves_reject_children() {
        let mut el = Element::text("hi", typesetter());
        let err = el.push_child(fixed(1, 1)).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::KindMismatch {
                expected: "container",
                actual: "text",
            }
        ));
    }

    #[test]
    fn test_kind_specific_ops_are_checked() {
        let mut flow = Element::flow(Direction::Vertical);
        assert!(matches!(
            flow.set_text("nope").unwrap_err(),
            LayoutError::KindMismatch {
                expected: "text",
                ..
            }
        ));

        assert!(matches!(
            flow.set_text_align(HAlign::Center).unwrap_err(),
            LayoutError::KindMismatch {
                expected: "text",
                ..
            }
        ));

        assert!(matches!(
            flow.push_column(Dimension::Auto).unwrap_err(),
            LayoutError::KindMismatch {
                expected: "grid",
                ..
            }
        ));

        let mut text = Element::text("hi", typesetter());
        assert!(text.set_text("rewritten").is_ok());
        assert!(text.set_text_align(HAlign::Right).is_ok());
    }

    #[test]
    fn test_child_index_bounds() {
        let mut root = Element::flow(Direction::Vertical);
        root.push_child(fixed(1, 1)).unwrap();
        assert!(matches!(
            root.remove_child(3).unwrap_err(),
            LayoutError::ChildOutOfBounds { index: 3, len: 1 }
        ));
        assert!(matches!(
            root.insert_child(2, fixed(1, 1)).unwrap_err(),
            LayoutError::ChildOutOfBounds { index: 2, len: 1 }
        ));
    }

    #[test]
    fn test_repeated_queries_hit_the_cache() {
        let root = fixed(10, 4);
        let parent = Size::new(40, 20);
        assert_eq!(root.layout_count(), 0);
        root.render_size(parent);
        root.render_size(parent);
        root.render_size(parent);
        assert_eq!(root.layout_count(), 1);
    }

    #[test]
    fn test_phases_cache_independently() {
        let root = fixed(10, 4);
        let parent = Size::new(40, 20);
        root.min_size(parent);
        root.max_size(parent);
        root.render_size(parent);
        root.min_size(parent);
        assert_eq!(root.layout_count(), 3);
    }

    #[test]
    fn test_new_parent_size_recomputes() {
        let root = fixed(10, 4);
        root.render_size(Size::new(80, 24));
        root.render_size(Size::new(40, 24));
        root.render_size(Size::new(40, 24));
        assert_eq!(root.layout_count(), 2);
    }

    #[test]
    fn test_style_change_invalidates_ancestors() {
        let mut root = Element::flow(Direction::Vertical);
        root.push_child(fixed(10, 2)).unwrap();
        let parent = Size::new(40, 20);

        root.render_size(parent);
        let baseline = root.layout_count();

        root.child_mut(0)
            .unwrap()
            .update_style(|s| s.height = Dimension::Chars(5));
        assert_eq!(root.render_size(parent).height, 5);
        assert_eq!(root.layout_count(), baseline + 1);
    }

    #[test]
    fn test_invalidation_climbs_multiple_levels() {
        let mut leaf_parent = Element::flow(Direction::Vertical);
        leaf_parent.push_child(Element::text("short", typesetter())).unwrap();
        let mut root = Element::flow(Direction::Vertical);
        root.push_child(leaf_parent).unwrap();

        let parent = Size::new(40, 20);
        assert_eq!(root.render_size(parent).height, 1);

        root.child_mut(0)
            .unwrap()
            .child_mut(0)
            .unwrap()
            .set_text("now long enough to wrap across forty columns easily")
            .unwrap();
        assert!(root.render_size(parent).height > 1);
    }

    #[test]
    fn test_removed_child_stops_notifying() {
        let mut root = Element::flow(Direction::Vertical);
        root.push_child(fixed(10, 2)).unwrap();
        let parent = Size::new(40, 20);

        let mut child = root.remove_child(0).unwrap();
        root.render_size(parent);
        let baseline = root.layout_count();

        child.update_style(|s| s.height = Dimension::Chars(9));
        root.render_size(parent);
        assert_eq!(root.layout_count(), baseline);
    }

    #[test]
    fn test_grid_area_rejected_at_set() {
        let mut root = Element::grid(
            vec![Dimension::Chars(5); 2],
            vec![Dimension::Chars(2); 2],
        )
        .unwrap();
        root.push_child(fixed(1, 1)).unwrap();

        let err = root.set_child_area(0, GridArea::new(0, 3, 0, 1)).unwrap_err();
        assert!(matches!(err, LayoutError::AreaOutOfBounds { .. }));
        let err = root.set_child_area(0, GridArea::new(1, 1, 0, 1)).unwrap_err();
        assert!(matches!(err, LayoutError::EmptyArea { .. }));
    }

    #[test]
    fn test_grid_area_on_non_grid_fails() {
        let mut root = Element::flow(Direction::Vertical);
        root.push_child(fixed(1, 1)).unwrap();
        assert!(matches!(
            root.set_child_area(0, GridArea::cell(0, 0)).unwrap_err(),
            LayoutError::KindMismatch { expected: "grid", .. }
        ));
    }

    #[test]
    fn test_render_hook_joins_before_return() {
        let seen = Arc::new(AtomicU32::new(0));
        let mut root = fixed(10, 4);
        let probe = Arc::clone(&seen);
        root.set_render_hook(move |size| {
            probe.store(u32::from(size.width), Ordering::SeqCst);
        });

        let mut canvas = Canvas::new(20, 10);
        root.render(&mut canvas, Rect::new(0, 0, 15, 6));
        assert_eq!(seen.load(Ordering::SeqCst), 15);
    }

    #[test]
    fn test_z_index_orders_siblings() {
        let mut root = fixed(10, 3);
        let mut above = Element::text("b", typesetter());
        above.update_style(|s| {
            s.position = Position::Absolute;
            s.width = Dimension::Chars(1);
            s.z_index = 1;
        });
        let mut below = Element::text("a", typesetter());
        below.update_style(|s| {
            s.position = Position::Absolute;
            s.width = Dimension::Chars(1);
        });
        // declared above-first; z order must still paint it last
        root.push_child(above).unwrap();
        root.push_child(below).unwrap();

        let mut canvas = Canvas::new(12, 4);
        root.render(&mut canvas, Rect::new(0, 0, 10, 3));
        assert_eq!(canvas.get(0, 0).unwrap().ch, 'b' as u32);
    }

    #[test]
    fn test_absolute_children_skip_flow() {
        let mut root = Element::flow(Direction::Vertical);
        root.push_child(fixed(10, 2)).unwrap();
        let mut floater = fixed(4, 1);
        floater.update_style(|s| {
            s.position = Position::Absolute;
            s.left = Dimension::Chars(3);
            s.top = Dimension::Chars(1);
        });
        root.push_child(floater).unwrap();

        let parent = Size::new(40, 20);
        assert_eq!(root.render_size(parent), Size::new(10, 2));
        let rects = root.children_layout(Phase::Render, parent);
        assert_eq!(rects[1], Rect::new(3, 1, 4, 1));
    }

    #[test]
    fn test_background_fills_border_box() {
        let mut root = fixed(4, 2);
        root.update_style(|s| s.bg = Rgba::BLUE);

        let mut canvas = Canvas::new(10, 5);
        root.render(&mut canvas, Rect::new(0, 0, 10, 5));
        assert_eq!(canvas.get(0, 0).unwrap().bg, Rgba::BLUE);
        assert_eq!(canvas.get(3, 1).unwrap().bg, Rgba::BLUE);
        assert_eq!(canvas.get(4, 1).unwrap().bg, Rgba::TERMINAL_DEFAULT);
    }

    #[test]
    fn test_debug_shows_kind() {
        let el = Element::flow(Direction::Horizontal);
        let repr = format!("{el:?}");
        assert!(repr.contains("flow"));
    }
}
