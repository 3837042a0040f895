use std::fmt;

use serde::Serialize;

use crate::diagnostics::{CompileError, SyntaxErrorKind};
use crate::lexer::TokenKind;
use crate::span::{Span, Spanned};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Abstract,
    Final,
}

impl Modifier {
    pub const ALL: [Modifier; 6] = [
        Modifier::Public,
        Modifier::Protected,
        Modifier::Private,
        Modifier::Static,
        Modifier::Abstract,
        Modifier::Final,
    ];

    pub fn from_token(kind: TokenKind) -> Option<Modifier> {
        match kind {
            TokenKind::Public => Some(Modifier::Public),
            TokenKind::Protected => Some(Modifier::Protected),
            TokenKind::Private => Some(Modifier::Private),
            TokenKind::Static => Some(Modifier::Static),
            TokenKind::Abstract => Some(Modifier::Abstract),
            TokenKind::Final => Some(Modifier::Final),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Abstract => "abstract",
            Modifier::Final => "final",
        }
    }

    pub fn visibility(self) -> Option<Visibility> {
        match self {
            Modifier::Public => Some(Visibility::Public),
            Modifier::Protected => Some(Visibility::Protected),
            Modifier::Private => Some(Visibility::Private),
            _ => None,
        }
    }

    pub fn is_visibility(self) -> bool {
        self.visibility().is_some()
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        })
    }
}

/// Bitset over [`Modifier`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierSet(u8);

impl ModifierSet {
    pub const EMPTY: ModifierSet = ModifierSet(0);
    pub const VISIBILITY: ModifierSet = ModifierSet::of(&[Modifier::Public, Modifier::Protected, Modifier::Private]);
    pub const ALL: ModifierSet = ModifierSet::of(&Modifier::ALL);

    pub const fn of(modifiers: &[Modifier]) -> ModifierSet {
        let mut bits = 0;
        let mut i = 0;
        while i < modifiers.len() {
            bits |= modifiers[i].bit();
            i += 1;
        }
        ModifierSet(bits)
    }

    pub const fn union(self, other: ModifierSet) -> ModifierSet {
        ModifierSet(self.0 | other.0)
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    /// Returns false if the modifier was already present.
    pub fn insert(&mut self, modifier: Modifier) -> bool {
        let fresh = !self.contains(modifier);
        self.0 |= modifier.bit();
        fresh
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::EMPTY;
        for m in iter {
            set.insert(m);
        }
        set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conflict {
    Visibility,
    Exclusive,
}

struct ExclusiveGroup {
    members: ModifierSet,
    conflict: Conflict,
}

/// At most one modifier of each group may appear on a declaration.
static EXCLUSIVE_GROUPS: [ExclusiveGroup; 2] = [
    ExclusiveGroup { members: ModifierSet::VISIBILITY, conflict: Conflict::Visibility },
    ExclusiveGroup { members: ModifierSet::of(&[Modifier::Abstract, Modifier::Final]), conflict: Conflict::Exclusive },
];

/// Declaration kinds that accept modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierTarget {
    Class,
    Method,
    Constant,
}

impl ModifierTarget {
    pub fn allowed(self) -> ModifierSet {
        match self {
            ModifierTarget::Class => ModifierSet::of(&[Modifier::Abstract, Modifier::Final]),
            ModifierTarget::Method => ModifierSet::ALL,
            ModifierTarget::Constant => ModifierSet::VISIBILITY.union(ModifierSet::of(&[Modifier::Final])),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            ModifierTarget::Class => "class declarations",
            ModifierTarget::Method => "methods",
            ModifierTarget::Constant => "class constants",
        }
    }
}

/// Modifiers seen since the last member, waiting for the declaration they apply to.
#[derive(Debug, Clone, Default)]
pub struct PendingModifiers {
    items: Vec<Spanned<Modifier>>,
    set: ModifierSet,
}

impl PendingModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Span of the earliest pending modifier.
    pub fn first_span(&self) -> Option<Span> {
        self.items.first().map(|m| m.span)
    }

    /// Record `modifier`. A repeat or a clash with an exclusive-group member
    /// already pending is reported at `span`.
    pub fn push(&mut self, modifier: Modifier, span: Span) -> Result<(), CompileError> {
        if self.set.contains(modifier) {
            let kind = if modifier.is_visibility() {
                SyntaxErrorKind::DuplicateVisibility { first: modifier, second: modifier }
            } else {
                SyntaxErrorKind::DuplicateModifier(modifier)
            };
            return Err(CompileError::syntax(kind, span));
        }

        for group in EXCLUSIVE_GROUPS.iter().filter(|g| g.members.contains(modifier)) {
            if let Some(existing) = self.items.iter().find(|m| group.members.contains(m.node)) {
                let kind = match group.conflict {
                    Conflict::Visibility => SyntaxErrorKind::DuplicateVisibility { first: existing.node, second: modifier },
                    Conflict::Exclusive => SyntaxErrorKind::ConflictingModifiers(existing.node, modifier),
                };
                return Err(CompileError::syntax(kind, span));
            }
        }

        self.set.insert(modifier);
        self.items.push(Spanned::new(modifier, span));
        Ok(())
    }

    /// Consume the pending modifiers for a declaration of kind `target`.
    pub fn take(&mut self, target: ModifierTarget) -> Result<AppliedModifiers, CompileError> {
        let items = std::mem::take(&mut self.items);
        let set = std::mem::take(&mut self.set);
        let allowed = target.allowed();
        if let Some(bad) = items.iter().find(|m| !allowed.contains(m.node)) {
            return Err(CompileError::syntax(
                SyntaxErrorKind::ModifierNotAllowed { modifier: bad.node, target: target.describe() },
                bad.span,
            ));
        }
        let visibility = items.iter().find_map(|m| m.node.visibility()).unwrap_or_default();
        Ok(AppliedModifiers { set, visibility })
    }
}

/// Modifiers committed to one declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppliedModifiers {
    pub set: ModifierSet,
    pub visibility: Visibility,
}

impl AppliedModifiers {
    pub fn is_static(&self) -> bool {
        self.set.contains(Modifier::Static)
    }

    pub fn is_abstract(&self) -> bool {
        self.set.contains(Modifier::Abstract)
    }

    pub fn is_final(&self) -> bool {
        self.set.contains(Modifier::Final)
    }
}
