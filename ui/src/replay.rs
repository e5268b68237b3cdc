use abstutil::prettyprint_usize;
use anyhow::Result;
use geom::{Circle, Distance, Duration};
use widgetry::tools::PopupMsg;
use widgetry::{
    Color, Drawable, EventCtx, GeomBatch, GfxCtx, HorizontalAlignment, Key, Line, Outcome, Panel,
    State, Text, UpdateType, VerticalAlignment, Widget,
};

use model::{Model, Playback, PlaybackStatus, Step, Toggle};

use crate::components::{describe, FileLoader};
use crate::{App, Transition};

/// How much wall-clock time passes between samples. Playback always advances exactly one sample
/// per interval, regardless of the recorded timestamps.
fn tick_interval() -> Duration {
    Duration::seconds(1.0)
}

pub struct Replay {
    panel: Panel,
    playback: Playback,
    draw_route: Drawable,
    draw_traveled: Drawable,
    draw_vehicle: Drawable,
    since_last_tick: Duration,
}

impl Replay {
    pub fn new_state(ctx: &mut EventCtx, app: &App) -> Box<dyn State<App>> {
        let mut batch = GeomBatch::new();
        batch.push(Color::grey(0.1), app.model.bounds.get_rectangle());
        if let Some(pl) = app.model.route.as_polyline() {
            batch.push(Color::CYAN, pl.make_polygons(Distance::meters(5.0)));
        }

        let mut state = Self {
            panel: Panel::new_builder(Widget::col(vec![
                Line("Route Replay").small_heading().into_widget(ctx),
                Widget::placeholder(ctx, "controls"),
                Widget::placeholder(ctx, "readouts"),
            ]))
            .aligned(HorizontalAlignment::Left, VerticalAlignment::Top)
            .build(ctx),
            playback: Playback::new(app.model.route.len()),
            draw_route: ctx.upload(batch),
            draw_traveled: Drawable::empty(ctx),
            draw_vehicle: Drawable::empty(ctx),
            since_last_tick: Duration::ZERO,
        };
        state.update_controls(ctx);
        state.sync_playhead(ctx, app);
        Box::new(state)
    }

    fn update_controls(&mut self, ctx: &mut EventCtx) {
        let label = match self.playback.status() {
            PlaybackStatus::Paused => "Play Simulation",
            PlaybackStatus::Playing => "Pause Simulation",
            PlaybackStatus::Finished => "Replay Simulation",
        };
        let row = Widget::row(vec![
            ctx.style()
                .btn_solid
                .text(label)
                .hotkey(Key::Space)
                .build_def(ctx),
            ctx.style()
                .btn_outline
                .text("load another route")
                .build_def(ctx),
        ]);
        self.panel.replace(ctx, "controls", row);
    }

    /// Redraws the traveled path and marker and refreshes the readouts from the current sample.
    /// Safe to call any number of times for the same position.
    fn sync_playhead(&mut self, ctx: &mut EventCtx, app: &App) {
        let idx = self.playback.current_index();
        let current = app.model.route.sample(idx);

        let mut batch = GeomBatch::new();
        if let Some(pl) = app.model.route.traveled_polyline(idx) {
            batch.push(Color::YELLOW, pl.make_polygons(Distance::meters(5.0)));
        }
        self.draw_traveled = ctx.upload(batch);

        let mut batch = GeomBatch::new();
        batch.push(
            Color::RED,
            Circle::new(current.pos, Distance::meters(30.0)).to_polygon(),
        );
        self.draw_vehicle = ctx.upload(batch);

        let readouts = Text::from_multiline(vec![
            Line(format!(
                "Sample {} of {}",
                prettyprint_usize(idx + 1),
                prettyprint_usize(app.model.route.len())
            )),
            Line(format!("Position: {}", describe::coordinates(current))),
            Line(format!("Time: {}", describe::clock(current))),
            Line(format!(
                "Speed: {}",
                describe::speed(app.model.route.previous(idx), current)
            )),
        ]);
        self.panel.replace(ctx, "readouts", readouts.into_widget(ctx));
    }
}

impl State<App> for Replay {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        ctx.canvas_movement();

        if let Outcome::Clicked(x) = self.panel.event(ctx) {
            match x.as_ref() {
                "Play Simulation" | "Pause Simulation" | "Replay Simulation" => {
                    match self.playback.toggle() {
                        Toggle::Started => {
                            self.since_last_tick = Duration::ZERO;
                        }
                        Toggle::Paused => {}
                        Toggle::Replayed => {
                            self.since_last_tick = Duration::ZERO;
                            self.sync_playhead(ctx, app);
                        }
                    }
                    self.update_controls(ctx);
                }
                "load another route" => {
                    return load_route(ctx);
                }
                _ => unreachable!(),
            }
        }

        if self.playback.is_playing() {
            if let Some(dt) = ctx.input.nonblocking_is_update_event() {
                ctx.input.use_update_event();
                self.since_last_tick = self.since_last_tick + dt;
                // A slow frame may cover several ticks; catch up rather than drift
                while self.since_last_tick >= tick_interval() {
                    self.since_last_tick = self.since_last_tick - tick_interval();
                    match self.playback.advance() {
                        Some(Step::Moved { .. }) => {
                            self.sync_playhead(ctx, app);
                        }
                        Some(Step::Finished) => {
                            self.update_controls(ctx);
                            break;
                        }
                        None => {
                            break;
                        }
                    }
                }
            }
            ctx.request_update(UpdateType::Game);
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        g.redraw(&self.draw_route);
        g.redraw(&self.draw_traveled);
        g.redraw(&self.draw_vehicle);
        self.panel.draw(g);
    }
}

pub fn load_route(ctx: &mut EventCtx) -> Transition {
    Transition::Push(FileLoader::new_state(
        ctx,
        Box::new(|ctx, app: &mut App, maybe_bytes: Result<Option<Vec<u8>>>| {
            match maybe_bytes {
                Ok(Some(bytes)) => match Model::load(&bytes) {
                    Ok(model) => {
                        *app = App::new(ctx, model);
                        Transition::Multi(vec![
                            Transition::Pop,
                            Transition::Replace(Replay::new_state(ctx, app)),
                        ])
                    }
                    Err(err) => Transition::Replace(PopupMsg::new_state(
                        ctx,
                        "Error",
                        vec![err.to_string()],
                    )),
                },
                // User didn't pick a file
                Ok(None) => Transition::Pop,
                Err(err) => {
                    Transition::Replace(PopupMsg::new_state(ctx, "Error", vec![err.to_string()]))
                }
            }
        }),
    ))
}
