use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use eframe::egui;

use crate::geometry::WindowBounds;
use crate::owner::{BoundsReply, GeometryOwner, OwnerNotice, WindowCommand};
use crate::placement::PlacementBootstrapper;
use crate::router::{HitRect, PointerRouter, SurfaceLayout};
use crate::settings::Settings;

/// Geometry owner adapter speaking `egui::ViewportCommand`. Window
/// geometry itself stays with the windowing backend; this side only
/// snapshots the bounds reported on the last frame and forwards
/// commands.
#[derive(Clone)]
pub struct ViewportOwner {
    ctx: egui::Context,
    known_bounds: Arc<Mutex<Option<WindowBounds>>>,
    notice_tx: Sender<OwnerNotice>,
    notice_rx: Arc<Mutex<Receiver<OwnerNotice>>>,
}

impl ViewportOwner {
    pub fn new(ctx: egui::Context) -> Self {
        let (notice_tx, notice_rx) = channel();
        Self {
            ctx,
            known_bounds: Arc::new(Mutex::new(None)),
            notice_tx,
            notice_rx: Arc::new(Mutex::new(notice_rx)),
        }
    }

    /// Record the window geometry reported for the current frame.
    pub fn observe_bounds(&self, bounds: WindowBounds) {
        if let Ok(mut known) = self.known_bounds.lock() {
            *known = Some(bounds);
        }
    }

    /// Handle for the backend bridge to push notices through.
    pub fn notice_sender(&self) -> Sender<OwnerNotice> {
        self.notice_tx.clone()
    }
}

impl GeometryOwner for ViewportOwner {
    fn send(&self, command: WindowCommand) {
        match command {
            WindowCommand::SetPosition { x, y } => self
                .ctx
                .send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                    x as f32, y as f32,
                ))),
            WindowCommand::SetSize { width, height } => self
                .ctx
                .send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    width as f32,
                    height as f32,
                ))),
            WindowCommand::Minimize => self
                .ctx
                .send_viewport_cmd(egui::ViewportCommand::Minimized(true)),
            WindowCommand::Hide => self
                .ctx
                .send_viewport_cmd(egui::ViewportCommand::Visible(false)),
        }
    }

    fn request_bounds(&self) -> BoundsReply {
        let known = self
            .known_bounds
            .lock()
            .ok()
            .and_then(|known| *known);
        match known {
            Some(bounds) => BoundsReply::ready(bounds),
            None => BoundsReply::failed(),
        }
    }

    fn request_display_bounds(&self) -> BoundsReply {
        match self.ctx.input(|i| i.viewport().monitor_size) {
            Some(size) => BoundsReply::ready(WindowBounds::new(
                0,
                0,
                size.x as i32,
                size.y as i32,
            )),
            None => BoundsReply::failed(),
        }
    }

    fn poll_notice(&self) -> Option<OwnerNotice> {
        self.notice_rx.lock().ok()?.try_recv().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Local>,
}

/// Display-only state fed by owner notices.
#[derive(Debug, Default)]
pub struct ShellState {
    pub memory_mb: Option<f64>,
    pub focus_input: bool,
}

pub fn apply_notice(state: &mut ShellState, notice: OwnerNotice) {
    match notice {
        OwnerNotice::FocusInput => state.focus_input = true,
        OwnerNotice::MemoryUsage(mb) => state.memory_mb = Some(mb),
    }
}

const HANDLE_THICKNESS: i32 = 6;

/// The frameless overlay: title row with window controls, transcript,
/// input line, and a status row. Renders data and routes pointer input;
/// it never computes window geometry itself.
pub struct ShellApp {
    owner: ViewportOwner,
    router: PointerRouter<ViewportOwner>,
    placement: PlacementBootstrapper,
    state: ShellState,
    transcript: Vec<ChatLine>,
    input: String,
}

impl ShellApp {
    pub fn new(ctx: egui::Context, settings: Settings) -> Self {
        let owner = ViewportOwner::new(ctx);
        let router = PointerRouter::new(owner.clone(), settings.constraints());
        Self {
            owner,
            router,
            placement: PlacementBootstrapper::new(settings.placement_inset),
            state: ShellState::default(),
            transcript: Vec::new(),
            input: String::new(),
        }
    }

    pub fn push_line(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.transcript.push(ChatLine {
            speaker,
            text: text.into(),
            at: Local::now(),
        });
    }

    fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        if text.trim().is_empty() {
            return;
        }
        self.push_line(Speaker::User, text);
    }
}

fn to_hit(rect: egui::Rect, origin: egui::Pos2) -> HitRect {
    HitRect::new(
        (rect.min.x + origin.x) as i32,
        (rect.min.y + origin.y) as i32,
        rect.width() as i32,
        rect.height() as i32,
    )
}

impl eframe::App for ShellApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Transparent behind the rounded panel.
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let outer = ctx.input(|i| i.viewport().outer_rect);
        if let Some(rect) = outer {
            self.owner.observe_bounds(WindowBounds::new(
                rect.min.x as i32,
                rect.min.y as i32,
                rect.width() as i32,
                rect.height() as i32,
            ));
        }
        self.placement.begin(&self.owner);
        self.placement.poll(&self.owner);

        while let Some(notice) = self.owner.poll_notice() {
            apply_notice(&mut self.state, notice);
        }

        // Screen-space origin for hit rects; pointer math has to stay in
        // one coordinate space while the window itself moves.
        let origin = outer.map(|rect| rect.min).unwrap_or(egui::Pos2::ZERO);

        let mut title_rect = None;
        let mut control_rects = Vec::new();

        let panel_frame = egui::Frame::default()
            .fill(ctx.style().visuals.panel_fill)
            .rounding(8.0)
            .inner_margin(10.0);

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                let title = ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Companion").strong());
                    ui.with_layout(
                        egui::Layout::right_to_left(egui::Align::Center),
                        |ui| {
                            let hide = ui.small_button("✕");
                            if hide.clicked() {
                                self.owner.send(WindowCommand::Hide);
                            }
                            let minimize = ui.small_button("–");
                            if minimize.clicked() {
                                self.owner.send(WindowCommand::Minimize);
                            }
                            vec![hide.rect, minimize.rect]
                        },
                    )
                    .inner
                });
                title_rect = Some(title.response.rect);
                control_rects = title.inner;

                ui.separator();

                let status_height = 40.0;
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .max_height(ui.available_height() - status_height)
                    .show(ui, |ui| {
                        for line in &self.transcript {
                            let prefix = match line.speaker {
                                Speaker::User => "you",
                                Speaker::Assistant => "assistant",
                            };
                            ui.label(format!(
                                "[{}] {}: {}",
                                line.at.format("%H:%M"),
                                prefix,
                                line.text
                            ));
                        }
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.input)
                            .hint_text("Ask anything…")
                            .desired_width(ui.available_width() - 60.0),
                    );
                    if self.state.focus_input {
                        response.request_focus();
                        self.state.focus_input = false;
                    }
                    let submitted = response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Send").clicked() || submitted {
                        self.submit_input();
                        response.request_focus();
                    }
                });
                if let Some(mb) = self.state.memory_mb {
                    ui.weak(format!("backend memory: {mb:.0} MB"));
                }
            });

        let mut layout = SurfaceLayout::new();
        if let Some(rect) = title_rect {
            layout.set_title_bar(to_hit(rect, origin));
        }
        for rect in control_rects {
            layout.add_control(to_hit(rect, origin));
        }
        layout.add_border_handles(to_hit(ctx.screen_rect(), origin), HANDLE_THICKNESS);
        self.router.set_layout(layout);

        let (pressed, released, down, delta, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.primary_down(),
                i.pointer.delta(),
                i.pointer.interact_pos(),
            )
        });
        let screen = |p: egui::Pos2| ((p.x + origin.x) as i32, (p.y + origin.y) as i32);
        if let Some(p) = pos {
            if pressed {
                self.router.pointer_down(screen(p));
            } else if down && delta != egui::Vec2::ZERO {
                self.router.pointer_moved(screen(p));
            }
        }
        if released {
            self.router.pointer_released();
        }
    }
}
