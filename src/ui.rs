use std::fmt::Write;

use gam::{Gam, GlyphStyle, Gid};
use gam::menu::*;

use breath_core::Label;

// Vertical placement as a percentage of canvas height
const PHASE_YOFFSET_PCT: isize = 6;
const HOLD1_YOFFSET_PCT: isize = 20;
const HOLD2_YOFFSET_PCT: isize = 60;
const PHASE_YSIZE_PCT: isize = 10;
const HOLD1_YSIZE_PCT: isize = 45;
const HOLD2_YSIZE_PCT: isize = HOLD1_YSIZE_PCT;

// Counter glyphs are much shorter than their slot
const HOLD_GLYPH_HEIGHT: isize = 40;

/// Last text written to each label; drawn on the next redraw.
pub struct Screen {
    phase: String,
    hold1: String,
    hold2: String,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            phase: String::new(),
            hold1: String::new(),
            hold2: String::new(),
        }
    }

    pub fn set_text(&mut self, label: Label, text: &str) {
        let slot = match label {
            Label::Phase => &mut self.phase,
            Label::Hold1 => &mut self.hold1,
            Label::Hold2 => &mut self.hold2,
        };
        slot.clear();
        slot.push_str(text);
    }
}

fn percent_of(pct: isize, max: isize) -> isize {
    (max * pct) / 100
}

pub fn clear_screen(gam: &Gam, content: Gid, screensize: Point) {
    gam.draw_rectangle(
        content,
        Rectangle::new_with_style(
            Point::new(0, 0),
            screensize,
            DrawStyle {
                fill_color: Some(PixelColor::Light),
                stroke_color: None,
                stroke_width: 0,
            },
        ),
    )
    .expect("can't clear");
}

fn post_label(gam: &Gam, content: Gid, top: isize, bottom: isize, width: isize, style: GlyphStyle, text: &str) {
    let mut tv = TextView::new(
        content,
        TextBounds::BoundingBox(Rectangle::new_coords(12, top, width - 12, bottom)),
    );
    tv.style = style;
    tv.clear_area = true;
    write!(tv.text, "{}", text).unwrap();
    gam.post_textview(&mut tv).expect("can't post label");
}

pub fn draw_breath(gam: &Gam, content: Gid, screensize: Point, screen: &Screen) {
    clear_screen(gam, content, screensize);

    let h = screensize.y;
    let w = screensize.x;

    let phase_top = percent_of(PHASE_YOFFSET_PCT, h);
    post_label(
        gam, content,
        phase_top,
        phase_top + percent_of(PHASE_YSIZE_PCT, h),
        w, GlyphStyle::Bold, &screen.phase,
    );

    let hold1_top = percent_of(HOLD1_YOFFSET_PCT, h);
    let hold1_bottom = hold1_top + percent_of(HOLD1_YSIZE_PCT, h).min(HOLD_GLYPH_HEIGHT);
    post_label(gam, content, hold1_top, hold1_bottom, w, GlyphStyle::Bold, &screen.hold1);

    let hold2_top = percent_of(HOLD2_YOFFSET_PCT, h);
    let hold2_bottom = hold2_top + percent_of(HOLD2_YSIZE_PCT, h).min(HOLD_GLYPH_HEIGHT);
    post_label(gam, content, hold2_top, hold2_bottom, w, GlyphStyle::Bold, &screen.hold2);

    // Footer
    let mut nav_tv = TextView::new(
        content,
        TextBounds::BoundingBox(Rectangle::new_coords(12, h - 50, w - 12, h - 10)),
    );
    nav_tv.style = GlyphStyle::Small;
    nav_tv.clear_area = true;
    write!(nav_tv.text, "ENTER/arrows=next phase  r=reset\nF1=help  F4=quit").unwrap();
    gam.post_textview(&mut nav_tv).expect("can't post footer");

    gam.redraw().expect("can't redraw");
}

pub fn draw_help(gam: &Gam, content: Gid, screensize: Point, help_text: &str) {
    clear_screen(gam, content, screensize);

    let line_height = 20;
    let mut y = 16isize;

    for line in help_text.lines() {
        if y + line_height > screensize.y - 40 {
            break;
        }
        let style = if y == 16 { GlyphStyle::Bold } else { GlyphStyle::Small };
        let mut tv = TextView::new(
            content,
            TextBounds::BoundingBox(Rectangle::new_coords(16, y, screensize.x - 16, y + line_height - 2)),
        );
        tv.style = style;
        tv.clear_area = true;
        write!(tv.text, "{}", line).unwrap();
        gam.post_textview(&mut tv).expect("can't post help line");
        y += line_height;
    }

    let mut nav_tv = TextView::new(
        content,
        TextBounds::BoundingBox(Rectangle::new_coords(12, screensize.y - 30, screensize.x - 12, screensize.y - 8)),
    );
    nav_tv.style = GlyphStyle::Small;
    nav_tv.clear_area = true;
    write!(nav_tv.text, "Press any key to close").unwrap();
    gam.post_textview(&mut nav_tv).expect("can't post footer");

    gam.redraw().expect("can't redraw");
}
