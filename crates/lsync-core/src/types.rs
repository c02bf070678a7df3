/// Either one value or a batch of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload<V> {
    One(V),
    Many(Vec<V>),
}

impl<V> Payload<V> {
    pub fn len(&self) -> usize {
        match self {
            Payload::One(_) => 1,
            Payload::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A reconciliation request against a keyed list of `T`, with keys of type `K`.
///
/// The set is closed: every kind is matched exhaustively by the engine.
/// Unknown kinds only exist at the JSON boundary (see [`crate::wire`]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action<T, K> {
    /// Blind append. No de-duplication against existing keys.
    Add(Payload<T>),
    /// Replace-only. Records without a matching key are dropped.
    Update(Payload<T>),
    /// Replace in place when the key exists, append otherwise.
    AddOrUpdate(Payload<T>),
    /// Drop every record whose key is listed.
    Remove(Payload<K>),
    /// Discard the state and take the payload verbatim.
    Reset(Vec<T>),
}

impl<T, K> Action<T, K> {
    pub fn add_one(record: T) -> Self {
        Action::Add(Payload::One(record))
    }

    pub fn add_many(records: Vec<T>) -> Self {
        Action::Add(Payload::Many(records))
    }

    pub fn update_one(record: T) -> Self {
        Action::Update(Payload::One(record))
    }

    pub fn update_many(records: Vec<T>) -> Self {
        Action::Update(Payload::Many(records))
    }

    pub fn upsert_one(record: T) -> Self {
        Action::AddOrUpdate(Payload::One(record))
    }

    pub fn upsert_many(records: Vec<T>) -> Self {
        Action::AddOrUpdate(Payload::Many(records))
    }

    pub fn remove_one(key: K) -> Self {
        Action::Remove(Payload::One(key))
    }

    pub fn remove_many(keys: Vec<K>) -> Self {
        Action::Remove(Payload::Many(keys))
    }

    pub fn reset(records: Vec<T>) -> Self {
        Action::Reset(records)
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Add(_) => ActionKind::Add,
            Action::Update(_) => ActionKind::Update,
            Action::AddOrUpdate(_) => ActionKind::AddOrUpdate,
            Action::Remove(_) => ActionKind::Remove,
            Action::Reset(_) => ActionKind::Reset,
        }
    }

    /// Number of payload entries (records or keys).
    pub fn payload_len(&self) -> usize {
        match self {
            Action::Add(p) | Action::Update(p) | Action::AddOrUpdate(p) => p.len(),
            Action::Remove(p) => p.len(),
            Action::Reset(records) => records.len(),
        }
    }
}

/// Discriminant of [`Action`], also the wire tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    Add,
    Update,
    AddOrUpdate,
    Remove,
    Reset,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Add,
        ActionKind::Update,
        ActionKind::AddOrUpdate,
        ActionKind::Remove,
        ActionKind::Reset,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Add => "ADD",
            ActionKind::Update => "UPDATE",
            ActionKind::AddOrUpdate => "ADD_OR_UPDATE",
            ActionKind::Remove => "REMOVE",
            ActionKind::Reset => "RESET",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do when a state holds the same key more than once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateKeyPolicy {
    /// Do not inspect.
    Allow,
    /// Log each duplicate at `warn` and carry on.
    #[default]
    Warn,
    /// Reject the state.
    Fail,
}

impl DuplicateKeyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateKeyPolicy::Allow => "allow",
            DuplicateKeyPolicy::Warn => "warn",
            DuplicateKeyPolicy::Fail => "fail",
        }
    }
}

/// What to do with a wire action whose tag is not a known [`ActionKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownActionPolicy {
    /// Identity transition.
    #[default]
    Ignore,
    /// Surface as [`crate::wire::WireError::UnknownAction`].
    Fail,
}

impl UnknownActionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnknownActionPolicy::Ignore => "ignore",
            UnknownActionPolicy::Fail => "fail",
        }
    }
}
