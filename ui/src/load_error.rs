use widgetry::{
    EventCtx, GfxCtx, HorizontalAlignment, Line, Outcome, Panel, State, Text, VerticalAlignment,
    Widget,
};

use crate::{App, Transition};

/// Shown when the route given on the command line couldn't be loaded. There's no play control
/// here; the only way forward is picking a different file.
pub struct LoadError {
    panel: Panel,
}

impl LoadError {
    pub fn new_state(ctx: &mut EventCtx, path: &str, err: anyhow::Error) -> Box<dyn State<App>> {
        Box::new(Self {
            panel: Panel::new_builder(Widget::col(vec![
                Line("Route Replay").small_heading().into_widget(ctx),
                Text::from_multiline(vec![
                    Line(format!("Couldn't load {path}:")),
                    Line(err.to_string()),
                ])
                .into_widget(ctx),
                ctx.style()
                    .btn_outline
                    .text("load a route file")
                    .build_def(ctx),
            ]))
            .aligned(HorizontalAlignment::Left, VerticalAlignment::Top)
            .build(ctx),
        })
    }
}

impl State<App> for LoadError {
    fn event(&mut self, ctx: &mut EventCtx, _: &mut App) -> Transition {
        if let Outcome::Clicked(x) = self.panel.event(ctx) {
            match x.as_ref() {
                "load a route file" => {
                    return crate::replay::load_route(ctx);
                }
                _ => unreachable!(),
            }
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        self.panel.draw(g);
    }
}
