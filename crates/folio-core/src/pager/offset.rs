//! Offset/transition engine
//!
//! `offset` is how far the current page sits from rest: positive reveals the
//! page on the left, negative the page on the right. Pixel motion enters
//! through [`Pager::consume_delta`], the only place where motion turns into
//! page-index changes.

use super::mode::Side;
use super::Pager;
use crate::host::{GalleryAdapter, GalleryHost};

impl<H, A> Pager<H, A>
where
    H: GalleryHost,
    A: GalleryAdapter<H::Page>,
{
    /// Move the page window by `dx` pixels (negative reveals the left page,
    /// positive the right page) and return the part of `dx` left over.
    ///
    /// The offset absorbs motion up to one page width plus the interval.
    /// Crossing that limit advances to the neighbour page and resets the
    /// offset; the overshoot is returned for the caller to re-apply against
    /// the shifted window. With no neighbour the limit is zero and all
    /// motion past rest is returned.
    pub fn consume_delta(&mut self, dx: i32) -> i32 {
        let width = self.host.width();
        let interval = self.config.interval_px;

        if dx < 0 {
            let has_left = self.has_side(Side::Left);
            let limit = if has_left { width + interval } else { 0 };

            if dx > self.offset - limit {
                self.offset -= dx;
                0
            } else {
                if has_left {
                    self.advance(self.mode.direction(Side::Left));
                }
                let remain = dx + limit - self.offset;
                self.offset = 0;
                remain
            }
        } else {
            let has_right = self.has_side(Side::Right);
            let limit = if has_right { -width - interval } else { 0 };

            if dx < self.offset - limit {
                self.offset -= dx;
                0
            } else {
                if has_right {
                    self.advance(self.mode.direction(Side::Right));
                }
                let remain = dx + limit - self.offset;
                self.offset = 0;
                remain
            }
        }
    }

    /// Feed `dx` through [`Pager::consume_delta`] until it is used up,
    /// requesting a fill after every step that made progress.
    ///
    /// Stops as soon as a step returns its input unchanged: the geometry
    /// cannot absorb any more motion in that direction.
    pub(crate) fn drain_delta(&mut self, dx: i32) {
        let mut remain = dx;
        while remain != 0 {
            let before = remain;
            remain = self.consume_delta(remain);
            if remain == before {
                break;
            }
            self.host.request_fill();
        }
    }
}
