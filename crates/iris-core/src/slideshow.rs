//! Slideshow playback state.
//!
//! Slides are independent of the viewed image: each gets its own
//! contain-fitted rectangle and exactly one is shown at a time.

use crate::geometry::{Rect, Size};
use crate::layout::{fit_into, FitMode};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Slide {
    pub shown: bool,
    pub natural: Option<Size>,
    /// Contain-fitted placement, once the natural size is known.
    pub rect: Option<Rect>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slideshow {
    slides: Vec<Slide>,
    current: usize,
    /// Whether starting playback asked the platform for fullscreen.
    pub requested_fullscreen: bool,
}

impl Slideshow {
    /// One slide per image, with `start` shown. `start` is clamped into
    /// range.
    pub fn new(len: usize, start: usize) -> Self {
        let current = start.min(len.saturating_sub(1));
        let slides = (0..len)
            .map(|i| Slide {
                shown: i == current,
                ..Slide::default()
            })
            .collect();
        Self {
            slides,
            current,
            requested_fullscreen: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<Slide> {
        self.slides.get(index).copied()
    }

    /// Only lists of two or more images advance on their own.
    pub fn auto_advances(&self, interval_ms: u64) -> bool {
        interval_ms > 0 && self.slides.len() > 1
    }

    /// Hide the current slide and show the next one, wrapping around.
    /// Returns `(hidden, shown)`.
    pub fn advance(&mut self) -> Option<(usize, usize)> {
        if self.slides.is_empty() {
            return None;
        }
        let hidden = self.current;
        self.slides[hidden].shown = false;
        self.current = (self.current + 1) % self.slides.len();
        self.slides[self.current].shown = true;
        Some((hidden, self.current))
    }

    /// Record the natural size of slide `index` and fit it into `frame`.
    pub fn fit(&mut self, index: usize, natural: Size, frame: Size) -> Option<Slide> {
        let slide = self.slides.get_mut(index)?;
        slide.natural = Some(natural);
        slide.rect = Some(fit_into(natural, frame, FitMode::Contain));
        Some(*slide)
    }

    /// Fit every slide with a known natural size into a new frame. Returns
    /// the indices that changed.
    pub fn refit(&mut self, frame: Size) -> Vec<usize> {
        let mut changed = Vec::new();
        for (i, slide) in self.slides.iter_mut().enumerate() {
            if let Some(natural) = slide.natural {
                slide.rect = Some(fit_into(natural, frame, FitMode::Contain));
                changed.push(i);
            }
        }
        changed
    }
}
