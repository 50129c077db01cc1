use std::rc::Rc;

use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use wasd::{KeyStateTracker, PreventDefault, TrackerOptions, WindowEvents};

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new().without_timestamps().init()?;

    let event_loop = EventLoop::new();
    let _window = WindowBuilder::new()
        .with_title("wasd")
        .build(&event_loop)?;

    let target = Rc::new(WindowEvents::new());

    let options = TrackerOptions::new()
        .allow(["w", "a", "s", "d", "shift", "space"])
        .combo("sprint", ["shift", "w"])
        .prevent(PreventDefault::keys(["space"]));

    let mut tracker = KeyStateTracker::new(options);
    tracker.on_update(|snapshot| {
        log::info!(
            "held: {:?}, sprint: {}",
            snapshot.held_keys(),
            snapshot.key_held("sprint"),
        );
    });
    tracker.attach(target.clone())?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => {
                target.dispatch(&event);

                if let WindowEvent::CloseRequested = event {
                    tracker.detach();
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => (),
        }
    });
}
