use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
struct Scope {
    store: HashMap<String, Object>,
    order: Vec<String>,
    outer: Option<Environment>,
    depth: usize,
}

/// A handle to one lexical scope.
///
/// Cloning the handle aliases the scope: a `let` made through any clone is
/// visible through all of them. Closures keep their defining scope alive
/// by holding a clone.
#[derive(Clone, Default)]
pub struct Environment(Rc<RefCell<Scope>>);

impl Environment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn new_enclosed(outer: &Environment) -> Self {
        Self::new_call(outer, outer.call_depth())
    }

    /// The scope of a function body running `depth` calls below the top
    /// level. `outer` is the scope the function was defined in.
    pub fn new_call(outer: &Environment, depth: usize) -> Self {
        Self(Rc::new(RefCell::new(Scope {
            outer: Some(outer.clone()),
            depth,
            ..Default::default()
        })))
    }

    /// Number of function calls active when code runs in this scope.
    pub fn call_depth(&self) -> usize {
        self.0.borrow().depth
    }

    /// Looks `name` up here, then in each enclosing scope in turn.
    pub fn get(&self, name: &str) -> Option<Object> {
        let scope = self.0.borrow();
        match scope.store.get(name) {
            Some(obj) => Some(obj.clone()),
            None => scope.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Binds `name` in this scope only, shadowing any outer binding.
    pub fn set(&self, name: &str, val: Object) {
        let mut scope = self.0.borrow_mut();
        if scope.store.insert(name.to_owned(), val).is_none() {
            scope.order.push(name.to_owned());
        }
    }

    /// Bindings of this scope, in the order they were first made.
    pub fn bindings(&self) -> Vec<(String, Object)> {
        let scope = self.0.borrow();
        scope
            .order
            .iter()
            .filter_map(|name| {
                scope
                    .store
                    .get(name)
                    .map(|obj| (name.clone(), obj.clone()))
            })
            .collect()
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// Only names are printed: a closure stored in its own scope makes the
// graph cyclic.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let scope = self.0.borrow();
        f.debug_struct("Environment")
            .field("names", &scope.order)
            .field("has_outer", &scope.outer.is_some())
            .field("depth", &scope.depth)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let env = Environment::new();
        env.set("x", Object::Integer(1));

        assert_eq!(env.get("x"), Some(Object::Integer(1)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_enclosed_lookup_walks_outward() {
        let outer = Environment::new();
        outer.set("x", Object::Integer(1));
        let inner = Environment::new_enclosed(&outer);
        inner.set("y", Object::Integer(2));

        assert_eq!(inner.get("x"), Some(Object::Integer(1)));
        assert_eq!(inner.get("y"), Some(Object::Integer(2)));
        assert_eq!(outer.get("y"), None);
    }

    #[test]
    fn test_set_shadows_without_touching_outer() {
        let outer = Environment::new();
        outer.set("x", Object::Integer(1));
        let inner = Environment::new_enclosed(&outer);
        inner.set("x", Object::Integer(2));

        assert_eq!(inner.get("x"), Some(Object::Integer(2)));
        assert_eq!(outer.get("x"), Some(Object::Integer(1)));
    }

    #[test]
    fn test_clones_share_bindings() {
        let env = Environment::new();
        let alias = env.clone();
        let inner = Environment::new_enclosed(&env);

        alias.set("late", Object::Boolean(true));

        assert_eq!(env.get("late"), Some(Object::Boolean(true)));
        assert_eq!(inner.get("late"), Some(Object::Boolean(true)));
        assert_eq!(env, alias);
        assert_ne!(env, Environment::new());
    }

    #[test]
    fn test_call_depth() {
        let global = Environment::new();
        let call = Environment::new_call(&global, 3);
        let nested = Environment::new_enclosed(&call);

        assert_eq!(global.call_depth(), 0);
        assert_eq!(call.call_depth(), 3);
        assert_eq!(nested.call_depth(), 3);
    }

    #[test]
    fn test_bindings_keep_insertion_order() {
        let env = Environment::new();
        env.set("b", Object::Integer(1));
        env.set("a", Object::Integer(2));
        env.set("b", Object::Integer(3));

        assert_eq!(
            env.bindings(),
            vec![
                ("b".to_owned(), Object::Integer(3)),
                ("a".to_owned(), Object::Integer(2)),
            ]
        );
    }
}
