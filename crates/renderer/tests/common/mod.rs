//! Shared helpers for renderer integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use osd_common::Color;
use renderer::{Framebuffer, TextOutline, TextRenderer};

/// One `draw_text` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub font_size: f32,
    pub color: Color,
    pub outlined: bool,
}

impl DrawnText {
    /// Horizontal center under [`RecordingFont`]'s metrics.
    pub fn center_x(&self) -> i32 {
        self.x + RecordingFont::width_of(&self.text, self.font_size) / 2
    }
}

pub type TextLog = Rc<RefCell<Vec<DrawnText>>>;

/// Fixed-advance font that records what it was asked to draw.
///
/// Every glyph is `font_size / 2` pixels wide; nothing is written to the
/// framebuffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingFont {
    log: TextLog,
}

impl RecordingFont {
    pub fn new() -> (Self, TextLog) {
        let font = Self::default();
        let log = font.log.clone();
        (font, log)
    }

    pub fn boxed() -> (Box<dyn TextRenderer>, TextLog) {
        let (font, log) = Self::new();
        (Box::new(font), log)
    }

    pub fn width_of(text: &str, font_size: f32) -> i32 {
        (text.chars().count() as f32 * font_size / 2.0) as i32
    }
}

impl TextRenderer for RecordingFont {
    fn measure_width(&self, text: &str, font_size: f32) -> i32 {
        Self::width_of(text, font_size)
    }

    fn draw_text(
        &self,
        _fb: &mut Framebuffer,
        text: &str,
        x: i32,
        y: i32,
        font_size: f32,
        color: Color,
        outline: Option<TextOutline>,
    ) {
        self.log.borrow_mut().push(DrawnText {
            text: text.to_string(),
            x,
            y,
            font_size,
            color,
            outlined: outline.is_some(),
        });
    }
}

pub fn texts(log: &TextLog) -> Vec<String> {
    log.borrow().iter().map(|d| d.text.clone()).collect()
}

pub fn find(log: &TextLog, text: &str) -> Option<DrawnText> {
    log.borrow().iter().find(|d| d.text == text).cloned()
}
