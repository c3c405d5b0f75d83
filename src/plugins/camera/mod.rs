//! Camera plugin (render-only).
//!
//! Frames every living actor: pans toward their centroid and zooms out as they
//! spread apart. Nothing here feeds back into the simulation.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      frame_actors (disjoint queries, before transform propagation)
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::actor::{Actor, Vitals};

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
    /// Scale used when all actors stand together.
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Actor spread (px) at which the camera reaches `max_zoom`.
    pub zoom_span: f32,
}

impl MainCamera {
    pub fn zoom_for(&self, spread: f32) -> f32 {
        let s = (spread / self.zoom_span).clamp(0.0, 1.0);
        self.min_zoom + (self.max_zoom - self.min_zoom) * s
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            frame_actors
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 4.0, min_zoom: 1.0, max_zoom: 1.6, zoom_span: 900.0 },
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Centroid of `points` and the larger side of their bounding box.
pub fn framing(points: impl IntoIterator<Item = Vec2>) -> Option<(Vec2, f32)> {
    let mut count = 0usize;
    let mut sum = Vec2::ZERO;
    let mut min = Vec2::splat(f32::MAX);
    let mut max = Vec2::splat(f32::MIN);
    for p in points {
        count += 1;
        sum += p;
        min = min.min(p);
        max = max.max(p);
    }
    if count == 0 {
        return None;
    }
    let extent = max - min;
    Some((sum / count as f32, extent.x.max(extent.y)))
}

fn frame_actors(
    time: Res<Time>,
    q_actors: Query<(&Transform, &Vitals), (With<Actor>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Actor>>,
) {
    let alive = q_actors
        .iter()
        .filter(|(_, vitals)| !vitals.is_dead())
        .map(|(tf, _)| tf.translation.truncate());
    let Some((center, spread)) = framing(alive) else {
        return;
    };
    let Ok((mut tf_cam, cam)) = q_cam.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let alpha = 1.0 - (-cam.responsiveness * dt).exp();

    let target = center.extend(tf_cam.translation.z);
    tf_cam.translation = tf_cam.translation.lerp(target, alpha);
    let zoom = tf_cam.scale.x + (cam.zoom_for(spread) - tf_cam.scale.x) * alpha;
    tf_cam.scale = Vec3::new(zoom, zoom, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_of_nothing_is_none() {
        assert!(framing(std::iter::empty()).is_none());
    }

    #[test]
    fn framing_centres_on_the_actors() {
        let (center, spread) = framing([Vec2::new(-100.0, 0.0), Vec2::new(300.0, 50.0)]).unwrap();
        assert_eq!(center, Vec2::new(100.0, 25.0));
        assert_eq!(spread, 400.0);
    }

    #[test]
    fn zoom_is_clamped_to_the_range() {
        let cam = MainCamera { responsiveness: 1.0, min_zoom: 1.0, max_zoom: 2.0, zoom_span: 100.0 };
        assert_eq!(cam.zoom_for(0.0), 1.0);
        assert_eq!(cam.zoom_for(50.0), 1.5);
        assert_eq!(cam.zoom_for(1_000.0), 2.0);
    }
}
