//! GameView: maps engine snapshots into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the player's board and side panel, then (in duel
//! mode) the opponent's board and side panel. A result box with the
//! high-score table is drawn on top once a session has finished.

use crate::core::{GameSnapshot, ScoreCard, Shape};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything drawn in one frame.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    pub player: &'a GameSnapshot,
    /// Present in duel mode.
    pub opponent: Option<&'a GameSnapshot>,
    pub sound_enabled: bool,
    /// Winner line, shown once the session has finished.
    pub result: Option<&'a str>,
    /// Best runs for the current mode, highest first.
    pub high_scores: &'a [ScoreCard],
}

impl<'a> Screen<'a> {
    pub fn solo(player: &'a GameSnapshot) -> Self {
        Self {
            player,
            opponent: None,
            sound_enabled: false,
            result: None,
            high_scores: &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PANEL_W: u16 = 12;
const PANEL_GAP: u16 = 2;
const SIDE_GAP: u16 = 4;
/// Rows reserved for a hold/next preview (vertical I is four tall).
const PREVIEW_ROWS: u16 = 4;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for one or two boards.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Width and height of the whole layout for `boards` boards.
    pub fn layout_size(&self, boards: u16) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let block_w = frame_w + PANEL_GAP + PANEL_W;
        let w = block_w * boards + SIDE_GAP * boards.saturating_sub(1);
        // Title row above, help row below.
        (w, frame_h + 2)
    }

    /// Render into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, screen: &Screen<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let boards = if screen.opponent.is_some() { 2 } else { 1 };
        let (layout_w, layout_h) = self.layout_size(boards);
        let (frame_w, _) = self.frame_size();
        let block_w = frame_w + PANEL_GAP + PANEL_W;

        let start_x = viewport.width.saturating_sub(layout_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(layout_h) / 2,
            AnchorY::Top => 0,
        };

        self.draw_block(
            fb,
            screen.player,
            "PLAYER",
            Some(screen.sound_enabled),
            start_x,
            start_y,
        );
        if let Some(opponent) = screen.opponent {
            let x = start_x + block_w + SIDE_GAP;
            self.draw_block(fb, opponent, "OPPONENT", None, x, start_y);
        }

        let help = CellStyle::new(Rgb::new(150, 150, 160), PANEL_BG).dim();
        fb.put_str_centered(
            0,
            start_y + layout_h - 1,
            viewport.width,
            "←→ move  ↑ rotate  ↓ soft  ⏎ drop  c hold  x clear  space pause  m sound  q quit",
            help,
        );

        if let Some(result) = screen.result {
            self.draw_result_box(fb, viewport, result, screen.high_scores);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, screen: &Screen<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(screen, viewport, &mut fb);
        fb
    }

    /// Title, board and side panel of one engine.
    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        title: &str,
        sound: Option<bool>,
        x: u16,
        y: u16,
    ) {
        let (frame_w, frame_h) = self.frame_size();
        let title_style = CellStyle::default().bold();
        fb.put_str_centered(x, y, frame_w, title, title_style);

        let board_y = y + 1;
        self.draw_board(fb, snap, x, board_y);
        self.draw_side_panel(fb, snap, sound, x + frame_w + PANEL_GAP, board_y);

        if snap.paused {
            self.draw_overlay_text(fb, x, board_y, frame_w, frame_h, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay_text(fb, x, board_y, frame_w, frame_h, "GAME OVER");
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, start_x: u16, start_y: u16) {
        let (frame_w, frame_h) = self.frame_size();
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);

        fb.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, ' ', bg);
        fb.draw_box(start_x, start_y, frame_w, frame_h, border);

        // Merged cells.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match piece_from_cell(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_board_cell(fb, start_x, start_y, x, y, kind),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        // Ghost piece.
        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost_style = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
            for (dx, dy, _) in active.shape.minos() {
                if let Some((x, y)) = on_board(active.x + dx, ghost_y + dy) {
                    self.fill_cell_rect(fb, start_x, start_y, x, y, '░', ghost_style);
                }
            }
        }

        // Active piece.
        if let Some(active) = snap.active {
            for (dx, dy, kind) in active.shape.minos() {
                if let Some((x, y)) = on_board(active.x + dx, active.y + dy) {
                    self.draw_board_cell(fb, start_x, start_y, x, y, kind);
                }
            }
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(piece_color(kind), BOARD_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        sound: Option<bool>,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x.saturating_add(PANEL_W) > fb.width() {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        for (name, v) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 2;
        }
        y += 1;

        fb.put_str(panel_x, y, "HOLD", label);
        if let Some(hold) = snap.hold {
            // Dimmed until the next merge makes hold available again.
            self.draw_preview(fb, panel_x, y + 1, &hold.shape, !snap.can_hold);
        } else {
            fb.put_str(panel_x, y + 1, "-", value);
        }
        y += PREVIEW_ROWS + 2;

        fb.put_str(panel_x, y, "NEXT", label);
        if let Some(next) = snap.next {
            self.draw_preview(fb, panel_x, y + 1, &next.shape, false);
        }
        y += PREVIEW_ROWS + 2;

        if snap.slowed {
            let slow = CellStyle::new(Rgb::new(120, 200, 255), PANEL_BG).bold();
            fb.put_str(panel_x, y, "SLOW", slow);
        }
        y += 1;

        if let Some(enabled) = sound {
            let text = if enabled { "SOUND ON" } else { "SOUND OFF" };
            fb.put_str(panel_x, y, text, value.dim());
        }
    }

    /// Piece preview with empty leading rows and columns trimmed.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape, dim: bool) {
        let min_dx = shape.minos().map(|(dx, _, _)| dx).min().unwrap_or(0);
        let min_dy = shape.minos().map(|(_, dy, _)| dy).min().unwrap_or(0);
        for (dx, dy, kind) in shape.minos() {
            let mut style = CellStyle::new(piece_color(kind), PANEL_BG);
            style.dim = dim;
            let px = x + ((dx - min_dx) as u16) * 2;
            let py = y + (dy - min_dy) as u16;
            fb.fill_rect(px, py, 2, 1, '█', style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str_centered(start_x, mid_y, frame_w, text, style);
    }

    fn draw_result_box(
        &self,
        fb: &mut FrameBuffer,
        viewport: Viewport,
        result: &str,
        scores: &[ScoreCard],
    ) {
        let box_w: u16 = 34;
        let box_h = 7 + scores.len() as u16;
        let x = viewport.width.saturating_sub(box_w) / 2;
        let y = viewport.height.saturating_sub(box_h) / 2;

        let body = CellStyle::default();
        fb.fill_rect(x, y, box_w, box_h, ' ', body);
        fb.draw_box(x, y, box_w, box_h, body);

        let banner = CellStyle::new(Rgb::new(255, 225, 56), PANEL_BG).bold();
        fb.put_str_centered(x, y + 1, box_w, result, banner);
        fb.put_str_centered(x, y + 3, box_w, "HIGH SCORES", body.bold());

        for (i, card) in scores.iter().enumerate() {
            let row = y + 4 + i as u16;
            let mut cx = fb.put_u32(x + 3, row, i as u32 + 1, body);
            cx = fb.put_str(cx, row, ". ", body);
            fb.put_u32(cx, row, card.score, body);
            let cx = fb.put_str(x + 17, row, "L", body.dim());
            fb.put_u32(cx, row, card.level, body.dim());
            let cx = fb.put_u32(x + 23, row, card.lines, body.dim());
            fb.put_str(cx, row, " ln", body.dim());
        }
        if scores.is_empty() {
            fb.put_str_centered(x, y + 4, box_w, "-", body.dim());
        }

        fb.put_str_centered(x, y + box_h - 2, box_w, "r restart  q quit", body.dim());
    }
}

fn on_board(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

fn piece_from_cell(v: u8) -> Option<PieceKind> {
    PieceKind::from_color_id(v)
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0xFF, 0x0D, 0x72),
        PieceKind::J => Rgb::new(0x0D, 0xC2, 0xFF),
        PieceKind::L => Rgb::new(0x0D, 0xFF, 0x72),
        PieceKind::O => Rgb::new(0xF5, 0x38, 0xFF),
        PieceKind::S => Rgb::new(0xFF, 0x8E, 0x0D),
        PieceKind::T => Rgb::new(0xFF, 0xE1, 0x38),
        PieceKind::Z => Rgb::new(0x38, 0x77, 0xFF),
    }
}
