//! Build a small world from a JSON config and dump its statistics as JSON.

use sinew::prelude::*;

#[derive(Default)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Default)]
struct Velocity {
    dx: f32,
    dy: f32,
}

#[derive(Default)]
struct Movement;

impl System for Movement {
    fn run(&mut self, world: &mut World, entities: &[Entity]) {
        for &entity in entities {
            let (dx, dy) = {
                let v = world.get_component::<Velocity>(entity);
                (v.dx, v.dy)
            };
            let p = world.get_component_mut::<Position>(entity);
            p.x += dx;
            p.y += dy;
        }
    }
}

fn main() {
    env_logger::init();

    let config = match WorldConfig::from_json(r#"{ "max_entities": 256 }"#) {
        Ok(config) => config,
        Err(e) => {
            log::error!("bad config: {}", e);
            return;
        }
    };

    let mut world = World::with_config(config);
    world.register_component::<Position>();
    world.register_component::<Velocity>();
    world.add_system::<Movement, (Position, Velocity)>();

    for i in 0..10 {
        let entity = world.create_entity();
        world.add_component::<Position>(entity);
        if i % 2 == 0 {
            world.add_component::<Velocity>(entity).dx = 1.0;
        }
    }
    world.run_systems();

    match serde_json::to_string_pretty(&world.stats()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("failed to serialize stats: {}", e),
    }
}
