use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::utils::dom;

pub const REVEAL_SELECTOR: &str = ".reveal";
pub const REVEALED_CLASS: &str = "active";

pub type EnterCallback<K> = Box<dyn FnOnce(&K)>;

/// One-shot enter callbacks for watched targets. A target leaves the registry
/// the first time it is reported intersecting.
pub struct RevealRegistry<K> {
    pending: Vec<(K, EnterCallback<K>)>,
}

impl<K> Default for RevealRegistry<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: PartialEq> RevealRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `key` is already being watched.
    pub fn register(&mut self, key: K, on_enter: EnterCallback<K>) -> bool {
        if self.is_pending(&key) {
            return false;
        }
        self.pending.push((key, on_enter));
        true
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every pending target that an entry reports as
    /// intersecting.
    pub fn take_entered<I>(&mut self, entries: I) -> Vec<(K, EnterCallback<K>)>
    where
        I: IntoIterator<Item = (K, bool)>,
    {
        let mut entered = Vec::new();
        for (key, intersecting) in entries {
            if !intersecting {
                continue;
            }
            if let Some(index) = self.pending.iter().position(|(k, _)| *k == key) {
                entered.push(self.pending.remove(index));
            }
        }
        entered
    }
}

/// Runs the enter callbacks for `entries` outside the registry borrow and
/// returns the targets that should stop being observed.
pub fn deliver<K, I>(registry: &RefCell<RevealRegistry<K>>, entries: I) -> Vec<K>
where
    K: PartialEq,
    I: IntoIterator<Item = (K, bool)>,
{
    let entered = registry.borrow_mut().take_entered(entries);
    entered
        .into_iter()
        .map(|(key, on_enter)| {
            on_enter(&key);
            key
        })
        .collect()
}

/// IntersectionObserver with one-shot enter callbacks. If the browser cannot
/// build the observer, registered targets simply never fire.
pub struct ViewportWatcher {
    registry: Rc<RefCell<RevealRegistry<Element>>>,
    observer: Option<IntersectionObserver>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl ViewportWatcher {
    pub fn new(threshold: f64, root_margin: Option<&str>) -> Self {
        let registry = Rc::new(RefCell::new(RevealRegistry::new()));

        let callback = {
            let registry = registry.clone();
            Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| (entry.target(), entry.is_intersecting()));
                for element in deliver(&registry, entries) {
                    observer.unobserve(&element);
                }
            }) as Box<dyn FnMut(Array, IntersectionObserver)>)
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        if let Some(margin) = root_margin {
            init.set_root_margin(margin);
        }

        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => Some(observer),
                Err(e) => {
                    log::warn!("IntersectionObserver unavailable: {:?}", e);
                    None
                }
            };

        Self {
            registry,
            observer,
            _callback: callback,
        }
    }

    pub fn observe(&self, element: &Element, on_enter: EnterCallback<Element>) {
        if !self.registry.borrow_mut().register(element.clone(), on_enter) {
            return;
        }
        if let Some(observer) = &self.observer {
            observer.observe(element);
        }
    }

    pub fn watching(&self) -> usize {
        self.registry.borrow().len()
    }
}

/// Observes every `.reveal` element and marks it `active` on first sight.
pub fn install_reveal_targets(
    document: &Document,
    config: &SiteConfig,
) -> SiteResult<Option<ViewportWatcher>> {
    let targets = dom::select_all(document, REVEAL_SELECTOR)?;
    if targets.is_empty() {
        return Ok(None);
    }

    let watcher = ViewportWatcher::new(config.reveal_threshold, Some(&config.reveal_root_margin));
    for target in &targets {
        watcher.observe(
            target,
            Box::new(|element: &Element| dom::add_class(element, REVEALED_CLASS)),
        );
    }
    log::debug!("Watching {} reveal targets", watcher.watching());
    Ok(Some(watcher))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting(hits: &Rc<Cell<u32>>) -> EnterCallback<u32> {
        let hits = hits.clone();
        Box::new(move |_: &u32| hits.set(hits.get() + 1))
    }

    #[test]
    fn reveals_once_even_when_reentering() {
        let registry = RefCell::new(RevealRegistry::new());
        let hits = Rc::new(Cell::new(0));
        registry.borrow_mut().register(1, counting(&hits));

        assert_eq!(deliver(&registry, [(1, true)]), vec![1]);
        assert!(deliver(&registry, [(1, false)]).is_empty());
        assert!(deliver(&registry, [(1, true)]).is_empty());
        assert!(deliver(&registry, [(1, true), (1, true)]).is_empty());
        assert_eq!(hits.get(), 1);
        assert!(registry.borrow().is_empty());
    }

    #[test]
    fn leaving_or_staying_out_does_not_reveal() {
        let registry = RefCell::new(RevealRegistry::new());
        let hits = Rc::new(Cell::new(0));
        registry.borrow_mut().register(7, counting(&hits));

        assert!(deliver(&registry, [(7, false), (8, true)]).is_empty());
        assert_eq!(hits.get(), 0);
        assert!(registry.borrow().is_pending(&7));
    }

    #[test]
    fn targets_are_tracked_independently() {
        let registry = RefCell::new(RevealRegistry::new());
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        registry.borrow_mut().register(1, counting(&first));
        registry.borrow_mut().register(2, counting(&second));

        assert_eq!(deliver(&registry, [(2, true), (1, false)]), vec![2]);
        assert_eq!((first.get(), second.get()), (0, 1));
        assert_eq!(deliver(&registry, [(1, true), (2, true)]), vec![1]);
        assert_eq!((first.get(), second.get()), (1, 1));
    }

    #[test]
    fn duplicate_registration_keeps_first_callback() {
        let mut registry = RevealRegistry::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        assert!(registry.register(3, counting(&first)));
        assert!(!registry.register(3, counting(&second)));
        assert_eq!(registry.len(), 1);

        let registry = RefCell::new(registry);
        deliver(&registry, [(3, true)]);
        assert_eq!((first.get(), second.get()), (1, 0));
    }

    #[test]
    fn callback_may_register_new_targets() {
        let registry = Rc::new(RefCell::new(RevealRegistry::new()));
        let hits = Rc::new(Cell::new(0));
        let inner = registry.clone();
        let follow_up = counting(&hits);
        registry.borrow_mut().register(
            1,
            Box::new(move |_: &u32| {
                inner.borrow_mut().register(2, follow_up);
            }),
        );

        deliver(&registry, [(1, true)]);
        assert!(registry.borrow().is_pending(&2));
        deliver(&registry, [(2, true)]);
        assert_eq!(hits.get(), 1);
    }
}
