use lumen_core::event::{
    Event, EventCategory, EventDispatcher, KeyCode, KeyPressedEvent, MouseButton,
    MouseButtonPressedEvent, Propagation, WindowCloseEvent, WindowResizeEvent,
};
use lumen_core::{Layer, LayerStack};
use std::cell::RefCell;
use std::rc::Rc;

type Seen = Rc<RefCell<Vec<&'static str>>>;

/// Records every event it sees and consumes the categories it is told to.
struct Recorder {
    name: &'static str,
    consumes: Option<EventCategory>,
    seen: Seen,
}

impl Layer for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    fn on_event(&mut self, event: &Event) -> Propagation {
        self.seen.borrow_mut().push(self.name);
        self.consumes
            .map(|category| event.is_in_category(category))
            .unwrap_or(false)
            .into()
    }
}

fn recorder(name: &'static str, consumes: Option<EventCategory>, seen: &Seen) -> Box<dyn Layer> {
    Box::new(Recorder {
        name,
        consumes,
        seen: Rc::clone(seen),
    })
}

/// Routes an event top-down the way the run loop does.
fn route(stack: &mut LayerStack, event: &Event) -> Propagation {
    for (_, layer) in stack.iter_mut().rev() {
        if layer.on_event(event).is_handled() {
            return Propagation::Handled;
        }
    }
    Propagation::Unhandled
}

#[test]
fn events_reach_overlays_first_and_stop_when_handled() {
    let seen = Seen::default();
    let mut stack = LayerStack::new();
    stack.push_layer(recorder("game", None, &seen));
    stack.push_layer(recorder("hud", Some(EventCategory::MOUSE), &seen));
    stack.push_overlay(recorder("debug", Some(EventCategory::KEYBOARD), &seen));

    let key: Event = KeyPressedEvent::new(KeyCode::F2, 0).into();
    assert!(route(&mut stack, &key).is_handled());
    assert_eq!(*seen.borrow(), ["debug"]);

    seen.borrow_mut().clear();
    let click: Event = MouseButtonPressedEvent::new(MouseButton::Left).into();
    assert!(route(&mut stack, &click).is_handled());
    assert_eq!(*seen.borrow(), ["debug", "hud"]);

    seen.borrow_mut().clear();
    let resize: Event = WindowResizeEvent::new(640, 480, 1280, 720).into();
    assert_eq!(route(&mut stack, &resize), Propagation::Unhandled);
    assert_eq!(*seen.borrow(), ["debug", "hud", "game"]);
}

#[test]
fn dispatcher_runs_every_matching_handler() {
    let event: Event = WindowCloseEvent.into();
    let mut dispatcher = EventDispatcher::new(&event);
    let mut runs = 0;

    assert!(dispatcher.dispatch::<WindowCloseEvent>(|_| {
        runs += 1;
        true
    }));
    assert!(dispatcher.dispatch::<WindowCloseEvent>(|_| {
        runs += 1;
        false
    }));
    assert!(!dispatcher.dispatch::<WindowResizeEvent>(|_| {
        runs += 1;
        true
    }));

    assert_eq!(runs, 2);
    assert!(dispatcher.is_handled());
}

#[test]
fn dispatch_reports_a_match_even_when_unhandled() {
    let event: Event = WindowResizeEvent::new(10, 20, 0, 0).into();
    let mut dispatcher = EventDispatcher::new(&event);
    let mut size = None;
    assert!(dispatcher.dispatch::<WindowResizeEvent>(|e| {
        size = Some((e.width, e.height));
        false
    }));
    assert_eq!(size, Some((10, 20)));
    assert_eq!(dispatcher.propagation(), Propagation::Unhandled);
}
