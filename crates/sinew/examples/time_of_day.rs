//! A clock resource advanced every update and read on a separate schedule,
//! all installed by one plugin.

use sinew::prelude::*;

#[derive(Default)]
struct TimeOfDay {
    time: i32,
}

#[derive(Default)]
struct Advance;

impl System for Advance {
    fn run(&mut self, world: &mut World, _entities: &[Entity]) {
        world.resource_mut::<TimeOfDay>().time += 1;
    }
}

#[derive(Default)]
struct PrintTime;

impl System for PrintTime {
    fn run(&mut self, world: &mut World, _entities: &[Entity]) {
        println!("its {} o'clock", world.get_resource::<TimeOfDay>().time);
    }
}

struct NewDay;
impl ScheduleLabel for NewDay {}

#[derive(Default)]
struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, world: &mut World) {
        world.add_resource::<TimeOfDay>();
        world.add_system_schedule::<NewDay>();
        world.add_system::<Advance, ()>();
        world.add_system::<PrintTime, ()>();
        world.change_system_schedule::<PrintTime, NewDay>();
    }
}

fn main() {
    env_logger::init();

    let mut world = World::new();
    world.add_plugin::<ClockPlugin>();

    for _ in 0..3 {
        world.run_systems();
    }
    world.run_schedule::<NewDay>();
    log::info!("day over after {} ticks", world.get_resource::<TimeOfDay>().time);
}
