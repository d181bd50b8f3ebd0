use bevy::prelude::*;

use crate::*;

/// Register every feature plugin of the view engine.
///
/// Order matters only for resources built with `FromWorld`: they read
/// `ViewSettings`, which `FleetViewPlugin` inserts before calling this.
pub(crate) fn register_feature_plugins(app: &mut App) {
    // Sources
    app.add_plugins(feed::FeedPlugin);
    app.add_plugins(view_mode::ViewModePlugin);
    app.add_plugins(focus::FocusPlugin);
    app.add_plugins(commands::FleetCommandsPlugin);

    // Projections
    app.add_plugins(view::FleetViewDerivePlugin);
    app.add_plugins(camera::MapCameraPlugin);
    app.add_plugins(signals::SignalsPlugin);
    app.add_plugins(observation::ObservationPlugin);
}
