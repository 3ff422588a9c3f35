//! Form model: field state tree, validation and submission

use super::error::{FormError, ValidationErrors};
use super::field::{FieldSpec, FieldState};
use super::group::{GroupSpec, SpecNode};
use super::path::{FieldPath, PathSegment};
use super::values::FormValues;
use serde_json::{Map, Value};
use std::fmt;

/// Notification sent to subscribers after the model changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ValueChanged { path: FieldPath, value: String },
    Validated { error_count: usize },
    Cleared,
}

/// Handle returned by [`FormModel::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FormEvent)>;

struct FieldEntry {
    spec: FieldSpec,
    state: FieldState,
}

enum StateNode {
    Field(FieldEntry),
    Group(GroupState),
    Repeated(Vec<GroupState>),
}

#[derive(Default)]
struct GroupState {
    entries: Vec<(String, StateNode)>,
}

impl GroupState {
    fn from_spec(spec: GroupSpec) -> Self {
        let entries = spec
            .into_entries()
            .into_iter()
            .map(|(key, node)| {
                let node = match node {
                    SpecNode::Field(spec) => StateNode::Field(FieldEntry {
                        spec,
                        state: FieldState::default(),
                    }),
                    SpecNode::Group(group) => StateNode::Group(Self::from_spec(group)),
                    SpecNode::Repeated(instances) => StateNode::Repeated(
                        instances.into_iter().map(Self::from_spec).collect(),
                    ),
                };
                (key, node)
            })
            .collect();
        Self { entries }
    }

    fn node(&self, segments: &[PathSegment]) -> Option<&StateNode> {
        let (PathSegment::Key(key), rest) = segments.split_first()? else {
            return None;
        };
        let node = self
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)?;
        if rest.is_empty() {
            return Some(node);
        }
        match (node, rest) {
            (StateNode::Group(group), rest) => group.node(rest),
            (StateNode::Repeated(instances), [PathSegment::Index(i), rest @ ..]) => {
                instances.get(*i)?.node(rest)
            }
            _ => None,
        }
    }

    fn node_mut(&mut self, segments: &[PathSegment]) -> Option<&mut StateNode> {
        let (PathSegment::Key(key), rest) = segments.split_first()? else {
            return None;
        };
        let node = self
            .entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)?;
        if rest.is_empty() {
            return Some(node);
        }
        match (node, rest) {
            (StateNode::Group(group), rest) => group.node_mut(rest),
            (StateNode::Repeated(instances), [PathSegment::Index(i), rest @ ..]) => {
                instances.get_mut(*i)?.node_mut(rest)
            }
            _ => None,
        }
    }

    fn visit<'a>(&'a self, prefix: &FieldPath, f: &mut dyn FnMut(FieldPath, &'a FieldEntry)) {
        for (key, node) in &self.entries {
            let path = prefix.clone().key(key.as_str());
            match node {
                StateNode::Field(entry) => f(path, entry),
                StateNode::Group(group) => group.visit(&path, f),
                StateNode::Repeated(instances) => {
                    for (i, group) in instances.iter().enumerate() {
                        group.visit(&path.clone().index(i), f);
                    }
                }
            }
        }
    }

    fn visit_mut(&mut self, prefix: &FieldPath, f: &mut dyn FnMut(FieldPath, &mut FieldEntry)) {
        for (key, node) in &mut self.entries {
            let path = prefix.clone().key(key.as_str());
            match node {
                StateNode::Field(entry) => f(path, entry),
                StateNode::Group(group) => group.visit_mut(&path, f),
                StateNode::Repeated(instances) => {
                    for (i, group) in instances.iter_mut().enumerate() {
                        group.visit_mut(&path.clone().index(i), f);
                    }
                }
            }
        }
    }

    fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, node)| {
                let value = match node {
                    StateNode::Field(entry) => Value::String(entry.state.value.clone()),
                    StateNode::Group(group) => group.to_value(),
                    StateNode::Repeated(instances) => {
                        Value::Array(instances.iter().map(Self::to_value).collect())
                    }
                };
                (key.clone(), value)
            })
            .collect();
        Value::Object(map)
    }
}

/// Owns the runtime state of every field declared by a [`GroupSpec`].
///
/// Values only change through [`FormModel::set`] and [`FormModel::clear`];
/// views observe changes through [`FormModel::subscribe`].
pub struct FormModel {
    root: GroupState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl FormModel {
    /// Build the state tree; every field starts empty, valid and clean
    pub fn new(spec: GroupSpec) -> Self {
        Self {
            root: GroupState::from_spec(spec),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current state of the field at `path`
    pub fn get(&self, path: &FieldPath) -> Result<&FieldState, FormError> {
        self.entry(path).map(|entry| &entry.state)
    }

    /// Definition of the field at `path`
    pub fn spec(&self, path: &FieldPath) -> Result<&FieldSpec, FormError> {
        self.entry(path).map(|entry| &entry.spec)
    }

    /// Overwrite the value at `path`.
    ///
    /// Marks the field dirty, clears its previous error, runs its change
    /// handler with the field key and notifies subscribers.
    pub fn set(&mut self, path: &FieldPath, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        let entry = match self.root.node_mut(path.segments()) {
            Some(StateNode::Field(entry)) => entry,
            _ => return Err(FormError::PathNotFound(path.clone())),
        };

        entry.state.value.clone_from(&value);
        entry.state.dirty = true;
        entry.state.error = None;
        let handler = entry.spec.change_handler().cloned();
        let key = entry.spec.key.clone();

        tracing::debug!(%path, "field value set");
        if let Some(handler) = handler {
            handler(&key);
        }
        self.notify(&FormEvent::ValueChanged {
            path: path.clone(),
            value,
        });
        Ok(())
    }

    /// Run every field's validators against the current values.
    ///
    /// The first failing validator of each field sets its error; the
    /// returned set lists every field now in error.
    pub fn validate(&mut self) -> ValidationErrors {
        let snapshot = self.values();
        let mut errors = ValidationErrors::default();

        self.root.visit_mut(&FieldPath::root(), &mut |path, entry| {
            let failure = entry
                .spec
                .validators()
                .iter()
                .find_map(|validator| validator.validate(&entry.state.value, &snapshot).err());
            if let Some(message) = &failure {
                errors.push(path, message.clone());
            }
            entry.state.error = failure;
        });

        tracing::debug!(error_count = errors.len(), "form validated");
        self.notify(&FormEvent::Validated {
            error_count: errors.len(),
        });
        errors
    }

    /// Validate and return the value tree, or the fields in error.
    /// Values are never modified here; a successful submit does not clear.
    pub fn try_submit(&mut self) -> Result<FormValues, ValidationErrors> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self.values())
        } else {
            Err(errors)
        }
    }

    /// Validate, then call exactly one of the callbacks.
    ///
    /// `on_success` receives the model so it can [`clear`](Self::clear) it.
    pub fn submit<S, E>(&mut self, on_success: S, on_error: E)
    where
        S: FnOnce(&mut Self, FormValues),
        E: FnOnce(ValidationErrors),
    {
        match self.try_submit() {
            Ok(values) => {
                tracing::info!("form submitted");
                on_success(self, values);
            }
            Err(errors) => {
                tracing::info!(error_count = errors.len(), "form submission rejected");
                on_error(errors);
            }
        }
    }

    /// Reset every field to empty, valid and clean
    pub fn clear(&mut self) {
        self.root
            .visit_mut(&FieldPath::root(), &mut |_, entry| entry.state.clear());
        tracing::debug!("form cleared");
        self.notify(&FormEvent::Cleared);
    }

    /// Snapshot of all values, shaped like the group tree
    pub fn values(&self) -> FormValues {
        FormValues::from_value(self.root.to_value())
    }

    /// Fields currently flagged with an error
    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        self.root.visit(&FieldPath::root(), &mut |path, entry| {
            if let Some(message) = &entry.state.error {
                errors.push(path, message.clone());
            }
        });
        errors
    }

    /// Number of instances of the repeated group at `path`
    pub fn group_instances(&self, path: &FieldPath) -> Result<usize, FormError> {
        match self.root.node(path.segments()) {
            Some(StateNode::Repeated(instances)) => Ok(instances.len()),
            _ => Err(FormError::PathNotFound(path.clone())),
        }
    }

    /// Every field path in declaration order
    pub fn field_paths(&self) -> Vec<FieldPath> {
        let mut paths = Vec::new();
        self.root
            .visit(&FieldPath::root(), &mut |path, _| paths.push(path));
        paths
    }

    /// Register a listener called after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&FormEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn entry(&self, path: &FieldPath) -> Result<&FieldEntry, FormError> {
        match self.root.node(path.segments()) {
            Some(StateNode::Field(entry)) => Ok(entry),
            _ => Err(FormError::PathNotFound(path.clone())),
        }
    }

    fn notify(&mut self, event: &FormEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for FormModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormModel")
            .field("values", self.values().as_value())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::validators::{EmailValidator, INVALID_EMAIL_MESSAGE};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn invite_spec(rows: usize) -> GroupSpec {
        GroupSpec::new().repeated("invite", rows, |_| {
            GroupSpec::new()
                .field(FieldSpec::text("name", "Name"))
                .field(FieldSpec::text("email", "Email address").validator(EmailValidator::default()))
        })
    }

    fn email(i: usize) -> FieldPath {
        FieldPath::repeated("invite", i, "email")
    }

    fn name(i: usize) -> FieldPath {
        FieldPath::repeated("invite", i, "name")
    }

    mod construct {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_fields_start_empty_and_clean() {
            let form = FormModel::new(invite_spec(3));
            for path in form.field_paths() {
                assert_eq!(form.get(&path).unwrap(), &FieldState::default());
            }
        }

        #[test]
        fn test_initial_state_is_valid() {
            let mut form = FormModel::new(invite_spec(3));
            assert!(form.validate().is_empty());
            assert!(form.validate().is_empty());
        }

        #[test]
        fn test_field_paths_in_declaration_order() {
            let form = FormModel::new(invite_spec(2));
            let paths: Vec<String> = form.field_paths().iter().map(ToString::to_string).collect();
            assert_eq!(
                paths,
                ["invite[0].name", "invite[0].email", "invite[1].name", "invite[1].email"]
            );
        }

        #[test]
        fn test_nested_groups() {
            let spec = GroupSpec::new()
                .field(FieldSpec::text("title", "Title"))
                .group(
                    "owner",
                    GroupSpec::new().field(FieldSpec::text("email", "Email")),
                );
            let mut form = FormModel::new(spec);
            let path = FieldPath::root().key("owner").key("email");
            form.set(&path, "a@b.com").unwrap();
            assert_eq!(
                form.values().as_value(),
                &json!({"title": "", "owner": {"email": "a@b.com"}})
            );
        }

        #[test]
        fn test_values_keep_declaration_order() {
            let spec = GroupSpec::new()
                .field(FieldSpec::text("zeta", "Zeta"))
                .repeated("invite", 1, |_| {
                    GroupSpec::new()
                        .field(FieldSpec::text("name", "Name"))
                        .field(FieldSpec::text("email", "Email"))
                });
            let form = FormModel::new(spec);
            assert_eq!(
                serde_json::to_string(&form.values()).unwrap(),
                r#"{"zeta":"","invite":[{"name":"","email":""}]}"#
            );
        }
    }

    mod get_and_set {
        use super::*;

        #[test]
        fn test_set_then_get_round_trips() {
            let mut form = FormModel::new(invite_spec(3));
            form.set(&name(2), "Grace").unwrap();
            let state = form.get(&name(2)).unwrap();
            assert_eq!(state.value, "Grace");
            assert!(state.dirty);
            assert!(!form.get(&name(1)).unwrap().dirty);
        }

        #[test]
        fn test_dotted_string_path_resolves_repeated_child() {
            let mut form = FormModel::new(invite_spec(3));
            let path: FieldPath = "invite.0.email".parse().unwrap();
            form.set(&path, "x@y.com").unwrap();
            assert_eq!(form.get(&email(0)).unwrap().value, "x@y.com");
        }

        #[test]
        fn test_set_clears_previous_error() {
            let mut form = FormModel::new(invite_spec(1));
            form.set(&email(0), "nope").unwrap();
            form.validate();
            assert!(form.get(&email(0)).unwrap().error.is_some());

            form.set(&email(0), "nope2").unwrap();
            assert!(form.get(&email(0)).unwrap().error.is_none());
        }

        #[test]
        fn test_undeclared_paths_fail() {
            let mut form = FormModel::new(invite_spec(3));
            let missing = [
                FieldPath::repeated("invite", 3, "email"),
                FieldPath::repeated("invite", 0, "phone"),
                FieldPath::root().key("invite"),
                FieldPath::root().key("invite").index(0),
                FieldPath::root().key("other"),
                FieldPath::root(),
            ];
            for path in missing {
                assert_eq!(form.get(&path), Err(FormError::PathNotFound(path.clone())));
                assert_eq!(
                    form.set(&path, "x"),
                    Err(FormError::PathNotFound(path.clone()))
                );
            }
        }

        #[test]
        fn test_change_handler_receives_field_key() {
            let seen = Rc::new(RefCell::new(Vec::new()));
            let handler_seen = Rc::clone(&seen);
            let handler: crate::state::forms::ChangeHandler =
                Rc::new(move |key: &str| handler_seen.borrow_mut().push(key.to_string()));

            let spec = GroupSpec::new().repeated("invite", 2, |_| {
                GroupSpec::new()
                    .field(FieldSpec::text("name", "Name").on_change(Rc::clone(&handler)))
                    .field(FieldSpec::text("email", "Email").on_change(Rc::clone(&handler)))
            });
            let mut form = FormModel::new(spec);
            form.set(&email(1), "a").unwrap();
            form.set(&name(0), "b").unwrap();

            assert_eq!(*seen.borrow(), ["email", "name"]);
        }

        #[test]
        fn test_spec_exposes_labels() {
            let form = FormModel::new(invite_spec(1));
            assert_eq!(form.spec(&email(0)).unwrap().label, "Email address");
        }
    }

    mod validate {
        use super::*;

        #[test]
        fn test_reports_only_failing_fields() {
            let mut form = FormModel::new(invite_spec(3));
            form.set(&email(0), "ok@example.com").unwrap();
            form.set(&email(1), "not-an-email").unwrap();

            let errors = form.validate();
            assert_eq!(errors.paths().cloned().collect::<Vec<_>>(), vec![email(1)]);
            assert_eq!(errors.message(&email(1)), Some(INVALID_EMAIL_MESSAGE));
            assert_eq!(
                form.get(&email(1)).unwrap().error.as_deref(),
                Some(INVALID_EMAIL_MESSAGE)
            );
            assert_eq!(form.errors(), errors);
        }

        #[test]
        fn test_first_failing_validator_wins() {
            let spec = GroupSpec::new().field(
                FieldSpec::text("code", "Code")
                    .validator(|v: &str, _: &FormValues| -> Result<(), String> {
                        if v.len() < 3 {
                            Err("too short".into())
                        } else {
                            Ok(())
                        }
                    })
                    .validator(|_: &str, _: &FormValues| -> Result<(), String> {
                        Err("always".into())
                    }),
            );
            let mut form = FormModel::new(spec);
            let path = FieldPath::root().key("code");
            form.set(&path, "ab").unwrap();
            assert_eq!(form.validate().message(&path), Some("too short"));
            form.set(&path, "abcd").unwrap();
            assert_eq!(form.validate().message(&path), Some("always"));
        }

        #[test]
        fn test_validators_see_sibling_values() {
            let spec = GroupSpec::new()
                .field(FieldSpec::text("password", "Password"))
                .field(FieldSpec::text("confirm", "Confirm").validator(
                    |v: &str, values: &FormValues| -> Result<(), String> {
                        if values.get(&FieldPath::root().key("password")) == Some(v) {
                            Ok(())
                        } else {
                            Err("does not match".into())
                        }
                    },
                ));
            let mut form = FormModel::new(spec);
            form.set(&FieldPath::root().key("password"), "s3cret").unwrap();
            form.set(&FieldPath::root().key("confirm"), "other").unwrap();
            assert_eq!(form.validate().len(), 1);
            form.set(&FieldPath::root().key("confirm"), "s3cret").unwrap();
            assert!(form.validate().is_empty());
        }

        #[test]
        fn test_field_without_validators_accepts_anything() {
            let mut form = FormModel::new(invite_spec(1));
            form.set(&name(0), "  @@ not an email  ").unwrap();
            assert!(form.validate().is_empty());
        }

        #[test]
        fn test_validation_does_not_touch_values() {
            let mut form = FormModel::new(invite_spec(1));
            form.set(&email(0), "bad").unwrap();
            form.validate();
            assert_eq!(form.get(&email(0)).unwrap().value, "bad");
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_success_delivers_value_tree() {
            let mut form = FormModel::new(invite_spec(3));
            form.set(&email(0), "x@y.com").unwrap();

            let mut delivered = None;
            let mut failed = false;
            form.submit(|_, values| delivered = Some(values), |_| failed = true);

            assert!(!failed);
            assert_eq!(
                delivered.unwrap().as_value(),
                &json!({"invite": [
                    {"name": "", "email": "x@y.com"},
                    {"name": "", "email": ""},
                    {"name": "", "email": ""}
                ]})
            );
            // submit never clears on its own
            assert_eq!(form.get(&email(0)).unwrap().value, "x@y.com");
        }

        #[test]
        fn test_error_reports_failing_paths_and_keeps_values() {
            let mut form = FormModel::new(invite_spec(3));
            form.set(&email(1), "not-an-email").unwrap();

            let mut reported = None;
            let mut succeeded = false;
            form.submit(|_, _| succeeded = true, |errors| reported = Some(errors));

            assert!(!succeeded);
            let errors = reported.unwrap();
            assert_eq!(errors.paths().cloned().collect::<Vec<_>>(), vec![email(1)]);
            assert_eq!(form.get(&email(1)).unwrap().value, "not-an-email");
        }

        #[test]
        fn test_exactly_one_callback_per_call() {
            let mut form = FormModel::new(invite_spec(2));
            for value in ["", "bad", "good@example.com", "also bad"] {
                form.set(&email(0), value).unwrap();
                let calls = std::cell::Cell::new(0);
                form.submit(|_, _| calls.set(calls.get() + 1), |_| calls.set(calls.get() + 1));
                assert_eq!(calls.get(), 1, "value {value:?}");
            }
        }

        #[test]
        fn test_success_handler_can_clear() {
            let mut form = FormModel::new(invite_spec(1));
            form.set(&name(0), "Ada").unwrap();
            form.set(&email(0), "ada@example.com").unwrap();
            form.submit(|form, _| form.clear(), |_| panic!("should be valid"));
            assert_eq!(form.get(&name(0)).unwrap(), &FieldState::default());
            assert_eq!(form.get(&email(0)).unwrap(), &FieldState::default());
        }
    }

    mod clear {
        use super::*;

        #[test]
        fn test_resets_values_errors_and_dirty_flags() {
            let mut form = FormModel::new(invite_spec(3));
            form.set(&name(0), "Ada").unwrap();
            form.set(&email(1), "broken").unwrap();
            form.validate();

            form.clear();
            for path in form.field_paths() {
                assert_eq!(form.get(&path).unwrap(), &FieldState::default());
            }
            assert!(form.errors().is_empty());

            form.clear();
            assert!(form.errors().is_empty());
            assert_eq!(form.group_instances(&FieldPath::root().key("invite")), Ok(3));
        }
    }

    mod subscriptions {
        use super::*;

        #[test]
        fn test_listeners_receive_events_in_order() {
            let events = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&events);
            let mut form = FormModel::new(invite_spec(1));
            form.subscribe(move |event| sink.borrow_mut().push(event.clone()));

            form.set(&email(0), "bad").unwrap();
            form.validate();
            form.clear();

            assert_eq!(
                *events.borrow(),
                vec![
                    FormEvent::ValueChanged {
                        path: email(0),
                        value: "bad".into()
                    },
                    FormEvent::Validated { error_count: 1 },
                    FormEvent::Cleared,
                ]
            );
        }

        #[test]
        fn test_unsubscribe_stops_notifications() {
            let count = Rc::new(RefCell::new(0));
            let sink = Rc::clone(&count);
            let mut form = FormModel::new(invite_spec(1));
            let id = form.subscribe(move |_| *sink.borrow_mut() += 1);

            form.set(&name(0), "a").unwrap();
            assert!(form.unsubscribe(id));
            assert!(!form.unsubscribe(id));
            form.set(&name(0), "b").unwrap();

            assert_eq!(*count.borrow(), 1);
        }
    }

    #[test]
    fn test_group_instances_rejects_non_repeated_paths() {
        let form = FormModel::new(invite_spec(3));
        assert_eq!(form.group_instances(&FieldPath::root().key("invite")), Ok(3));
        assert!(form.group_instances(&name(0)).is_err());
    }
}
