//! Three coloured entities and a system that prints each one.
//!
//! Run with `RUST_LOG=debug` to see registrations.

use sinew::prelude::*;

#[derive(Default, Clone, Copy)]
struct Color {
    r: u8,
    g: u8,
    b: u8,
}

#[derive(Default)]
struct PrintColor;

impl System for PrintColor {
    fn run(&mut self, world: &mut World, entities: &[Entity]) {
        for &entity in entities {
            let color = world.get_component::<Color>(entity);
            println!("r: {} g: {} b: {}", color.r, color.g, color.b);
        }
    }
}

fn main() {
    env_logger::init();

    let mut world = World::new();
    world.register_component::<Color>();
    world.add_system::<PrintColor, (Color,)>();

    for (r, g, b) in [(122, 17, 0), (0, 245, 178), (0, 12, 79)] {
        let entity = world.create_entity();
        *world.add_component::<Color>(entity) = Color { r, g, b };
    }

    world.run_systems();
}
