// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use super::{Layer, LayerId};

type Entry = (LayerId, Box<dyn Layer>);

fn entry((id, layer): &Entry) -> (LayerId, &dyn Layer) {
    (*id, layer.as_ref())
}

fn entry_mut((id, layer): &mut Entry) -> (LayerId, &mut dyn Layer) {
    (*id, layer.as_mut())
}

/// An ordered collection of layers followed by overlays.
///
/// Entries in `[0, insert_index)` are layers and entries in
/// `[insert_index, len)` are overlays, so overlays always update after and
/// receive events before every regular layer.
#[derive(Default)]
pub struct LayerStack {
    layers: Vec<Entry>,
    insert_index: usize,
    next_id: u64,
}

impl LayerStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_id(&mut self) -> LayerId {
        let id = LayerId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Inserts `layer` after the existing layers and before every overlay.
    pub fn push_layer(&mut self, layer: Box<dyn Layer>) -> LayerId {
        let id = self.issue_id();
        log::debug!("Pushing layer '{}' as {}.", layer.name(), id);
        self.layers.insert(self.insert_index, (id, layer));
        self.insert_index += 1;
        id
    }

    /// Appends `overlay` after everything else.
    pub fn push_overlay(&mut self, overlay: Box<dyn Layer>) -> LayerId {
        let id = self.issue_id();
        log::debug!("Pushing overlay '{}' as {}.", overlay.name(), id);
        self.layers.push((id, overlay));
        id
    }

    /// Removes a layer and hands it back. Overlays are never matched.
    ///
    /// Does not call [`Layer::on_detach`].
    pub fn pop_layer(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let position = self.layers[..self.insert_index]
            .iter()
            .position(|(entry_id, _)| *entry_id == id)?;
        self.insert_index -= 1;
        Some(self.layers.remove(position).1)
    }

    /// Removes an overlay and hands it back. Regular layers are never matched.
    ///
    /// Does not call [`Layer::on_detach`].
    pub fn pop_overlay(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let offset = self.layers[self.insert_index..]
            .iter()
            .position(|(entry_id, _)| *entry_id == id)?;
        Some(self.layers.remove(self.insert_index + offset).1)
    }

    /// Layers then overlays. Reverse it to walk from the top overlay down.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (LayerId, &dyn Layer)> + '_ {
        self.layers.iter().map(entry)
    }

    /// Mutable counterpart of [`iter`](Self::iter).
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (LayerId, &mut dyn Layer)> + '_ {
        self.layers.iter_mut().map(entry_mut)
    }

    /// Looks up a layer or overlay by id.
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut dyn Layer> {
        self.iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, layer)| layer)
    }

    /// Whether `id` is in the stack.
    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Total number of layers and overlays.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack holds nothing.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of regular layers.
    pub fn layer_count(&self) -> usize {
        self.insert_index
    }

    /// Number of overlays.
    pub fn overlay_count(&self) -> usize {
        self.layers.len() - self.insert_index
    }
}

impl std::fmt::Debug for LayerStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerStack")
            .field(
                "layers",
                &self.iter().map(|(_, layer)| layer.name()).collect::<Vec<_>>(),
            )
            .field("insert_index", &self.insert_index)
            .finish()
    }
}

impl Drop for LayerStack {
    fn drop(&mut self) {
        for (_, layer) in self.layers.iter_mut() {
            layer.on_detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Named {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Layer for Named {
        fn name(&self) -> &str {
            self.name
        }

        fn on_detach(&mut self) {
            self.log.borrow_mut().push(format!("detach {}", self.name));
        }
    }

    fn named(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn Layer> {
        Box::new(Named {
            name,
            log: Rc::clone(log),
        })
    }

    fn names(stack: &LayerStack) -> Vec<String> {
        stack.iter().map(|(_, layer)| layer.name().to_owned()).collect()
    }

    #[test]
    fn overlays_stay_above_layers() {
        let log = Rc::default();
        let mut stack = LayerStack::new();
        stack.push_overlay(named("O1", &log));
        stack.push_layer(named("L1", &log));
        stack.push_overlay(named("O2", &log));
        stack.push_layer(named("L2", &log));

        assert_eq!(names(&stack), ["L1", "L2", "O1", "O2"]);
        assert_eq!(stack.layer_count(), 2);
        assert_eq!(stack.overlay_count(), 2);

        let reversed: Vec<_> = stack.iter().rev().map(|(_, l)| l.name().to_owned()).collect();
        assert_eq!(reversed, ["O2", "O1", "L2", "L1"]);
    }

    #[test]
    fn pops_are_confined_to_their_region() {
        let log = Rc::default();
        let mut stack = LayerStack::new();
        let layer = stack.push_layer(named("L", &log));
        let overlay = stack.push_overlay(named("O", &log));

        assert!(stack.pop_layer(overlay).is_none());
        assert!(stack.pop_overlay(layer).is_none());
        assert_eq!(stack.len(), 2);

        let popped = stack.pop_layer(layer).map(|l| l.name().to_owned());
        assert_eq!(popped.as_deref(), Some("L"));
        assert_eq!(stack.layer_count(), 0);
        assert_eq!(stack.overlay_count(), 1);

        // A popped id is gone for good.
        assert!(stack.pop_layer(layer).is_none());
        assert!(stack.pop_overlay(overlay).is_some());
        assert!(stack.is_empty());
    }

    #[test]
    fn ids_are_never_reused() {
        let log = Rc::default();
        let mut stack = LayerStack::new();
        let first = stack.push_layer(named("A", &log));
        stack.pop_layer(first);
        let second = stack.push_layer(named("B", &log));
        assert_ne!(first, second);
        assert!(!stack.contains(first));
        assert_eq!(stack.get_mut(second).map(|l| l.name().to_owned()).as_deref(), Some("B"));
    }

    #[test]
    fn drop_detaches_front_to_back() {
        let log: Rc<RefCell<Vec<String>>> = Rc::default();
        {
            let mut stack = LayerStack::new();
            stack.push_overlay(named("O", &log));
            stack.push_layer(named("A", &log));
            stack.push_layer(named("B", &log));
        }
        assert_eq!(*log.borrow(), ["detach A", "detach B", "detach O"]);
    }

    #[test]
    fn popped_layers_are_not_detached_by_the_stack() {
        let log: Rc<RefCell<Vec<String>>> = Rc::default();
        let popped = {
            let mut stack = LayerStack::new();
            let id = stack.push_layer(named("A", &log));
            stack.pop_layer(id)
        };
        assert!(log.borrow().is_empty());
        assert!(popped.is_some());
    }
}
