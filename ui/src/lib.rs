#[macro_use]
extern crate log;

mod components;
mod load_error;
mod replay;

use abstutil::Timer;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use structopt::StructOpt;
use widgetry::{Canvas, Color, EventCtx, GfxCtx, Settings, SharedAppState, State};

use model::Model;

#[derive(StructOpt)]
struct Args {
    /// The path to a JSON file with recorded position samples
    #[structopt(long, default_value = "data/route.json")]
    route: String,
}

impl Args {
    fn load(self) -> Result<Model> {
        let bytes = fs_err::read(&self.route)?;
        Model::load(&bytes)
    }
}

fn run(settings: Settings) {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());

    widgetry::run(settings, move |ctx| {
        let route_path = args.route.clone();
        let states: Vec<Box<dyn State<App>>>;
        let app = match ctx.loading_screen("load route", |_, _| args.load()) {
            Ok(model) => {
                let app = App::new(ctx, model);
                restore_savestate(ctx);
                states = vec![replay::Replay::new_state(ctx, &app)];
                app
            }
            Err(err) => {
                // Leave nothing interactive except a way to pick another file
                error!("Couldn't load {route_path}: {err}");
                let app = App::new(ctx, Model::empty());
                states = vec![load_error::LoadError::new_state(ctx, &route_path, err)];
                app
            }
        };
        (app, states)
    });
}

pub fn main() {
    run(Settings::new("Route Replay"));
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_wasm() {
    run(Settings::new("Route Replay").root_dom_element_id("loading".to_string()));
}

pub struct App {
    model: Model,
}

impl SharedAppState for App {
    fn draw_default(&self, g: &mut GfxCtx) {
        if cfg!(not(target_arch = "wasm32")) {
            g.clear(Color::BLACK);
        }
    }

    fn before_quit(&self, canvas: &Canvas) {
        let ss = Savestate {
            cam_x: canvas.cam_x,
            cam_y: canvas.cam_y,
            cam_zoom: canvas.cam_zoom,
        };
        abstio::write_json("data/save.json".to_string(), &ss);
    }
}

pub type Transition = widgetry::Transition<App>;

impl App {
    pub fn new(ctx: &mut EventCtx, model: Model) -> Self {
        if !model.route.is_empty() {
            let bounds = &model.bounds;
            ctx.canvas.map_dims = (bounds.max_x, bounds.max_y);
            ctx.canvas.center_on_map_pt(bounds.center());
        }

        Self { model }
    }
}

// This only makes sense on native. before_quit is never called on web.
fn restore_savestate(ctx: &mut EventCtx) {
    if let Ok(savestate) =
        abstio::maybe_read_json::<Savestate>("data/save.json".to_string(), &mut Timer::throwaway())
    {
        ctx.canvas.cam_x = savestate.cam_x;
        ctx.canvas.cam_y = savestate.cam_y;
        ctx.canvas.cam_zoom = savestate.cam_zoom;
    }
}

/// Only the camera. Where playback was when the app quit is deliberately forgotten.
#[derive(Serialize, Deserialize)]
struct Savestate {
    cam_x: f64,
    cam_y: f64,
    cam_zoom: f64,
}
