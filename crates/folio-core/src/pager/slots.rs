//! Page slot lifecycle
//!
//! The pager owns up to three page views. Every view comes from the host
//! (`obtain_page`), is bound to an index through the adapter, and goes back
//! through `unbind` + `release_page`; nothing else holds a page across a fill.

use super::mode::{Direction, Side, SlotRole};
use super::Pager;
use crate::geometry::{clamp, Rect};
use crate::host::{Component, ContentState, GalleryAdapter, GalleryHost};
use crate::{Error, Result};

/// A page view bound to a gallery index
#[derive(Debug)]
pub struct PageSlot<P> {
    index: usize,
    page: P,
}

impl<P> PageSlot<P> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }
}

#[derive(Debug)]
pub(crate) struct Slots<P> {
    pub previous: Option<PageSlot<P>>,
    pub current: Option<PageSlot<P>>,
    pub next: Option<PageSlot<P>>,
}

impl<P> Default for Slots<P> {
    fn default() -> Self {
        Self {
            previous: None,
            current: None,
            next: None,
        }
    }
}

impl<P> Slots<P> {
    pub fn get(&self, role: SlotRole) -> Option<&PageSlot<P>> {
        match role {
            SlotRole::Previous => self.previous.as_ref(),
            SlotRole::Current => self.current.as_ref(),
            SlotRole::Next => self.next.as_ref(),
        }
    }

    pub fn get_mut(&mut self, role: SlotRole) -> Option<&mut PageSlot<P>> {
        match role {
            SlotRole::Previous => self.previous.as_mut(),
            SlotRole::Current => self.current.as_mut(),
            SlotRole::Next => self.next.as_mut(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageSlot<P>> {
        [&self.previous, &self.current, &self.next]
            .into_iter()
            .filter_map(Option::as_ref)
    }
}

fn place_center<C: Component>(view: &mut C, width: i32, height: i32) {
    let (w, h) = view.preferred_size();
    view.layout(Rect::new(0, 0, width, height).centered(w, h));
}

impl<H, A> Pager<H, A>
where
    H: GalleryHost,
    A: GalleryAdapter<H::Page>,
{
    /// Fill pass: reconcile views with the adapter's content state and lay
    /// them out at the current offset.
    ///
    /// - still loading: only a progress placeholder
    /// - error or empty: only an error placeholder carrying the message
    /// - pages: the logical index is clamped into range, then current,
    ///   previous (index > 0) and next (index < last) are materialized
    pub fn fill(&mut self) -> Result<()> {
        let adapter = self.adapter.as_ref().ok_or(Error::NotAttached)?;
        let state = adapter.state();
        let error = adapter.error();
        let width = self.host.width();
        let height = self.host.height();

        match state {
            ContentState::Wait => {
                self.remove_error_view();
                self.remove_all_pages();

                let progress = match self.progress.take() {
                    Some(progress) => progress,
                    None => self.host.obtain_progress(),
                };
                let progress = self.progress.insert(progress);
                place_center(progress, width, height);
            }
            ContentState::Error | ContentState::Ready(0) => {
                let text = if state == ContentState::Ready(0) {
                    self.host.empty_text()
                } else {
                    error.unwrap_or_else(|| self.host.default_error_text())
                };

                self.remove_progress();
                self.remove_all_pages();

                let mut view = match self.error_view.take() {
                    Some(view) => view,
                    None => self.host.obtain_error_view(),
                };
                if self.error_text.as_deref() != Some(text.as_str()) {
                    self.host.bind_error_view(&mut view, &text);
                    self.error_text = Some(text);
                }
                let view = self.error_view.insert(view);
                place_center(view, width, height);
            }
            ContentState::Ready(size) => {
                self.remove_progress();
                self.remove_error_view();

                if self.index >= size {
                    tracing::warn!(index = self.index, size, "Index out of range, clamping");
                    self.index = size - 1;
                    self.remove_all_pages();
                }
                let index = self.index;

                if self.slots.current.is_none() {
                    self.slots.current = self.obtain_slot(index);
                }
                if index > 0 {
                    if self.slots.previous.is_none() {
                        self.slots.previous = self.obtain_slot(index - 1);
                    }
                } else if let Some(previous) = self.slots.previous.take() {
                    self.remove_page(previous);
                }
                if index < size - 1 {
                    if self.slots.next.is_none() {
                        self.slots.next = self.obtain_slot(index + 1);
                    }
                } else if let Some(next) = self.slots.next.take() {
                    self.remove_page(next);
                }

                self.layout_pages(width, height);
            }
        }

        Ok(())
    }

    fn layout_pages(&mut self, width: i32, height: i32) {
        let interval = self.config.interval_px;
        let left = self.mode.role(Side::Left);
        let right = self.mode.role(Side::Right);

        let min = if self.slots.get(right).is_none() {
            0
        } else {
            -width - interval + 1
        };
        let max = if self.slots.get(left).is_none() {
            0
        } else {
            width + interval - 1
        };
        self.offset = clamp(self.offset, min, max);

        let offset = self.offset;
        if let Some(slot) = self.slots.current.as_mut() {
            slot.page.layout(Rect::new(offset, 0, width + offset, height));
        }
        if let Some(slot) = self.slots.get_mut(left) {
            slot.page
                .layout(Rect::new(-interval - width + offset, 0, -interval + offset, height));
        }
        if let Some(slot) = self.slots.get_mut(right) {
            slot.page.layout(Rect::new(
                width + interval + offset,
                0,
                width + interval + width + offset,
                height,
            ));
        }
    }

    /// Shift the slot window one index in `direction`. At most one page is
    /// released and one obtained. Returns false at either end of the gallery.
    pub(crate) fn advance(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Backward => {
                if self.index == 0 {
                    return false;
                }
                self.index -= 1;

                if let Some(next) = self.slots.next.take() {
                    self.remove_page(next);
                }
                self.slots.next = self.slots.current.take();
                self.slots.current = self.slots.previous.take();

                if self.index > 0 {
                    self.slots.previous = self.obtain_slot(self.index - 1);
                }
            }
            Direction::Forward => {
                let size = self.content_state().page_count().unwrap_or(0);
                if self.index + 1 >= size {
                    return false;
                }
                self.index += 1;

                if let Some(previous) = self.slots.previous.take() {
                    self.remove_page(previous);
                }
                self.slots.previous = self.slots.current.take();
                self.slots.current = self.slots.next.take();

                if self.index + 1 < size {
                    self.slots.next = self.obtain_slot(self.index + 1);
                }
            }
        }

        tracing::debug!(index = self.index, ?direction, "Advanced page");
        true
    }

    /// Page on `side` under the current reading mode
    pub(crate) fn side_slot(&self, side: Side) -> Option<&PageSlot<H::Page>> {
        self.slots.get(self.mode.role(side))
    }

    #[inline]
    pub(crate) fn has_side(&self, side: Side) -> bool {
        self.side_slot(side).is_some()
    }

    fn obtain_slot(&mut self, index: usize) -> Option<PageSlot<H::Page>> {
        let adapter = self.adapter.as_mut()?;
        let mut page = self.host.obtain_page();
        adapter.bind(&mut page, index);
        Some(PageSlot { index, page })
    }

    fn remove_page(&mut self, mut slot: PageSlot<H::Page>) {
        if let Some(adapter) = self.adapter.as_mut() {
            adapter.unbind(&mut slot.page);
        }
        self.host.release_page(slot.page);
    }

    pub(crate) fn remove_all_pages(&mut self) {
        for slot in [
            self.slots.previous.take(),
            self.slots.current.take(),
            self.slots.next.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.remove_page(slot);
        }
    }

    pub(crate) fn remove_progress(&mut self) {
        if let Some(progress) = self.progress.take() {
            self.host.release_progress(progress);
        }
    }

    pub(crate) fn remove_error_view(&mut self) {
        if let Some(view) = self.error_view.take() {
            self.host.release_error_view(view);
            self.error_text = None;
        }
    }

    /// Materialized page in `role`
    pub fn slot(&self, role: SlotRole) -> Option<&PageSlot<H::Page>> {
        self.slots.get(role)
    }

    /// Materialized pages, previous to next
    pub fn pages(&self) -> impl Iterator<Item = &PageSlot<H::Page>> {
        self.slots.iter()
    }

    pub fn current_page(&self) -> Option<&H::Page> {
        self.slots.current.as_ref().map(|slot| &slot.page)
    }

    pub fn current_page_mut(&mut self) -> Option<&mut H::Page> {
        self.slots.current.as_mut().map(|slot| &mut slot.page)
    }

    pub fn find_page_by_index(&self, index: usize) -> Option<&H::Page> {
        self.slots
            .iter()
            .find(|slot| slot.index == index)
            .map(|slot| &slot.page)
    }

    /// Index of the page laid out under `(x, y)`
    pub fn index_under(&self, x: f32, y: f32) -> Option<usize> {
        self.slots.current.as_ref()?;
        let (x, y) = (x as i32, y as i32);
        [SlotRole::Current, SlotRole::Previous, SlotRole::Next]
            .into_iter()
            .filter_map(|role| self.slots.get(role))
            .find(|slot| slot.page.bounds().contains(x, y))
            .map(|slot| slot.index)
    }
}
