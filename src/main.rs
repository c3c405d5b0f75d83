use bevy::app::AppExit;

fn main() -> AppExit {
    phase_arena::game::run()
}
