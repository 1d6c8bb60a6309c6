//! # TestCity: headless harness for growth integration tests
//!
//! Wraps a `bevy::app::App` running `SimulationPlugin` without a window or
//! renderer. Build the map with the `with_*` methods, then `tick()` and
//! inspect the resulting resources.

mod assertions;
mod queries;
mod setup;

use bevy::prelude::*;

use crate::SimulationPlugin;

pub struct TestCity {
    app: App,
}

impl TestCity {
    /// An empty 256x256 land grid with every resource at its default.
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(SimulationPlugin);

        // One update so plugin setup completes before the first tick.
        app.update();

        Self { app }
    }
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}
