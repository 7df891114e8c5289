//! Frame rendering with ratatui.
//!
//! Layout, top to bottom: progress bar, the digit readout, the controls
//! bar. Fullscreen drops everything but the readout.

use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Gauge, Paragraph};
use ratatui::Frame;

use super::glyphs::{self, LARGE_HEIGHT, SMALL_HEIGHT};
use crate::display::FrameView;
use crate::input::{FieldFocus, InputFields};
use crate::types::TimerPhase;

const DIGIT_GAP: &str = " ";
const GROUP_GAP: &str = "  ";

/// Everything a frame needs, borrowed from the app.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub view: FrameView,
    pub fields: &'a InputFields,
    pub controls_visible: bool,
    pub fullscreen: bool,
}

/// Draws one frame.
pub fn render(frame: &mut Frame, ctx: &RenderContext<'_>) {
    let area = frame.area();

    if ctx.fullscreen {
        render_readout(frame, area, &ctx.view);
        return;
    }

    let controls_height = if ctx.controls_visible { 3 } else { 0 };
    let [progress_area, readout_area, controls_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(controls_height),
    ])
    .areas(area);

    render_progress(frame, progress_area, &ctx.view);
    render_readout(frame, readout_area, &ctx.view);
    if ctx.controls_visible {
        render_controls(frame, controls_area, ctx);
    }
}

fn base_color(phase: TimerPhase) -> Color {
    if phase.is_alerting() {
        Color::Red
    } else {
        Color::White
    }
}

fn render_progress(frame: &mut Frame, area: Rect, view: &FrameView) {
    let color = match view.phase {
        TimerPhase::Alerting => Color::Red,
        TimerPhase::Running => Color::Green,
        TimerPhase::Idle | TimerPhase::Paused => Color::Yellow,
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(view.progress_percent / 100.0)
        .label(format!("{}%", view.progress_rounded()));
    frame.render_widget(gauge, area);
}

/// Builds the `MM:SS.d` readout as styled lines.
pub fn readout_lines(view: &FrameView) -> Vec<Line<'static>> {
    let mut digit_style = Style::default()
        .fg(base_color(view.phase))
        .add_modifier(Modifier::BOLD);
    if view.alert_blink {
        digit_style = digit_style.add_modifier(Modifier::DIM);
    }
    let colon_style = if view.colon_visible && !view.alert_blink {
        digit_style
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let dot_style = if view.alert_blink {
        Style::default().fg(Color::DarkGray)
    } else {
        digit_style
    };

    let [m1, m2, s1, s2, tenths] = view.digits.as_array();
    let large: Vec<Vec<String>> = [m1, m2, s1, s2].into_iter().map(glyphs::large_digit).collect();
    let colon = glyphs::colon();
    let small = glyphs::small_digit(tenths);
    let dots = glyphs::small_double_dot();
    let small_offset = LARGE_HEIGHT - SMALL_HEIGHT;
    let small_width = small[0].chars().count();

    (0..LARGE_HEIGHT)
        .map(|row| {
            let (dot, tenth) = if row >= small_offset {
                (
                    dots[row - small_offset].clone(),
                    small[row - small_offset].clone(),
                )
            } else {
                (" ".to_string(), " ".repeat(small_width))
            };

            Line::from(vec![
                Span::styled(large[0][row].clone(), digit_style),
                Span::raw(DIGIT_GAP),
                Span::styled(large[1][row].clone(), digit_style),
                Span::raw(GROUP_GAP),
                Span::styled(colon[row].clone(), colon_style),
                Span::raw(GROUP_GAP),
                Span::styled(large[2][row].clone(), digit_style),
                Span::raw(DIGIT_GAP),
                Span::styled(large[3][row].clone(), digit_style),
                Span::raw(GROUP_GAP),
                Span::styled(dot, dot_style),
                Span::raw(DIGIT_GAP),
                Span::styled(tenth, digit_style),
            ])
        })
        .collect()
}

fn render_readout(frame: &mut Frame, area: Rect, view: &FrameView) {
    let [centered] = Layout::vertical([Constraint::Length(LARGE_HEIGHT as u16)])
        .flex(Flex::Center)
        .areas(area);

    let readout = Paragraph::new(readout_lines(view)).alignment(Alignment::Center);
    frame.render_widget(readout, centered);
}

fn render_controls(frame: &mut Frame, area: Rect, ctx: &RenderContext<'_>) {
    let field_style = |focus: FieldFocus| {
        if ctx.fields.focus == focus {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::UNDERLINED)
        }
    };

    let (start_label, start_color) = if ctx.view.phase.is_running() {
        ("Pause", Color::Yellow)
    } else {
        ("Start", Color::Green)
    };
    let start_style = if ctx.view.start_disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(start_color)
    };

    let line = Line::from(vec![
        Span::raw("min "),
        Span::styled(
            format!("{:>3}", ctx.fields.minutes.text()),
            field_style(FieldFocus::Minutes),
        ),
        Span::raw("  sec "),
        Span::styled(
            format!("{:>3}", ctx.fields.seconds.text()),
            field_style(FieldFocus::Seconds),
        ),
        Span::raw("   "),
        Span::styled("[Enter] Set", Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(format!("[Space] {}", start_label), start_style),
        Span::raw("  [R] Reset"),
    ]);

    let block = Block::bordered()
        .title(" MM:SS.d  Space start/pause · R reset · F fullscreen · H hide · Q quit ")
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(line).block(block), area);
}
