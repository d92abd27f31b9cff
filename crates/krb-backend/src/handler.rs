use std::collections::HashMap;

/// Maps a click handler's resolved name to a zero-argument host callback
/// (spec §4.1's Handler Registry, §4.8 step 4). Handlers are registered
/// once at startup and invoked synchronously from the dispatcher; they
/// may mutate process-wide host state but must not reach back into the
/// render tree mid-dispatch (spec §5).
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn FnMut()>>,
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("registered", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, handler: impl FnMut() + 'static) {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Invokes the named handler if one is registered. Returns whether a
    /// handler was found — an unmatched name is a warning, not an error
    /// (spec §7: "missing handler ... produces a warning and continue").
    pub fn invoke(&mut self, name: &str) -> bool {
        if let Some(handler) = self.handlers.get_mut(name) {
            handler();
            true
        } else {
            tracing::warn!(handler = name, "no handler registered for click event");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn invoke_runs_the_registered_closure() {
        let counter = Rc::new(Cell::new(0));
        let mut registry = HandlerRegistry::new();
        let counter_clone = counter.clone();
        registry.register("increment", move || counter_clone.set(counter_clone.get() + 1));

        assert!(registry.invoke("increment"));
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn invoke_on_an_unknown_name_reports_no_match() {
        let mut registry = HandlerRegistry::new();
        assert!(!registry.invoke("missing"));
    }
}
