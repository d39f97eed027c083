//! # Contract Registry
//!
//! Every contract the service speaks, built once at start-up and read-only
//! afterwards. Handlers look shapes up by name; operators and the dry-run
//! endpoint can also name an instantiation such as `page<member_view>`.
//!
//! ## Expression grammar
//!
//! ```text
//! expr := name | name '<' expr (',' expr)* '>'
//! name := [A-Za-z0-9_]+
//! ```
//!
//! Common instantiations are pre-built and registered under their
//! canonical (whitespace-free) expression, so [`ContractRegistry::resolve`]
//! finds them without rebuilding. Other expressions are instantiated on
//! each call and never stored.

use std::collections::BTreeMap;

use oms_shape::{boolean, nothing, null, number, string, GenericShape, Shape};

use crate::error::ContractError;
use crate::{member, organization, wrapper};

/// Well-known contract names.
pub mod names {
    pub const ORGANIZATION: &str = "organization";
    pub const CREATE_ORGANIZATION: &str = "create_organization";
    pub const ORGANIZATION_PATH: &str = "organization_path";
    pub const MEMBER: &str = "member";
    pub const MEMBER_VIEW: &str = "member_view";
    pub const INVITE_MEMBER: &str = "invite_member";
    pub const MEMBER_PATCH: &str = "member_patch";
    pub const MEMBER_PATH: &str = "member_path";
    pub const PAGE_ORGANIZATION: &str = "page<organization>";
    pub const PAGE_MEMBER_VIEW: &str = "page<member_view>";
    pub const ENVELOPE_ORGANIZATION: &str = "envelope<organization>";
    pub const ENVELOPE_MEMBER_VIEW: &str = "envelope<member_view>";
}

/// Named shapes and generic constructors.
#[derive(Debug, Clone)]
pub struct ContractRegistry {
    shapes: BTreeMap<String, Shape>,
    generics: BTreeMap<String, GenericShape>,
}

impl ContractRegistry {
    /// Build every contract of the service.
    ///
    /// # Errors
    ///
    /// [`ContractError::Shape`] if a declaration is defective.
    pub fn new() -> Result<Self, ContractError> {
        let mut registry = Self::empty();

        registry.register("string", string());
        registry.register("number", number());
        registry.register("boolean", boolean());
        registry.register("null", null());
        registry.register("nothing", nothing());

        registry.register("plan", organization::plan());
        registry.register("settings", organization::settings());
        registry.register(names::ORGANIZATION, organization::organization()?.into_shape());
        registry.register(
            names::CREATE_ORGANIZATION,
            organization::create_organization()?.into_shape(),
        );
        registry.register(
            "organization_summary",
            organization::organization_summary()?.into_shape(),
        );
        registry.register(
            names::ORGANIZATION_PATH,
            organization::organization_path()?.into_shape(),
        );

        registry.register("role", member::role());
        registry.register(names::MEMBER, member::member()?.into_shape());
        registry.register(names::MEMBER_VIEW, member::member_view()?);
        registry.register(names::INVITE_MEMBER, member::invite_member()?.into_shape());
        registry.register(names::MEMBER_PATCH, member::member_patch()?.into_shape());
        registry.register(names::MEMBER_PATH, member::member_path()?.into_shape());

        registry.register_generic(wrapper::page_generic());
        registry.register_generic(wrapper::envelope_generic());

        for expr in [
            names::PAGE_ORGANIZATION,
            names::PAGE_MEMBER_VIEW,
            names::ENVELOPE_ORGANIZATION,
            names::ENVELOPE_MEMBER_VIEW,
        ] {
            let instantiated = registry.resolve(expr)?;
            registry.register(expr, instantiated);
        }

        tracing::debug!(
            contracts = registry.shapes.len(),
            generics = registry.generics.len(),
            "contract registry built"
        );
        Ok(registry)
    }

    /// A registry with nothing in it.
    pub fn empty() -> Self {
        Self {
            shapes: BTreeMap::new(),
            generics: BTreeMap::new(),
        }
    }

    /// Add or replace a concrete contract. Intended for start-up only.
    pub fn register(&mut self, name: impl Into<String>, shape: Shape) {
        let name = name.into();
        tracing::debug!(contract = %name, "registered contract");
        self.shapes.insert(name, shape);
    }

    /// Add or replace a generic contract. Intended for start-up only.
    pub fn register_generic(&mut self, generic: GenericShape) {
        tracing::debug!(generic = %generic.name(), arity = generic.arity(), "registered generic contract");
        self.generics.insert(generic.name().to_string(), generic);
    }

    /// Look up a concrete contract by exact name.
    pub fn get(&self, name: &str) -> Result<&Shape, ContractError> {
        self.shapes
            .get(name)
            .ok_or_else(|| ContractError::UnknownContract(name.to_string()))
    }

    pub fn generic(&self, name: &str) -> Result<&GenericShape, ContractError> {
        self.generics
            .get(name)
            .ok_or_else(|| ContractError::UnknownGeneric(name.to_string()))
    }

    /// Concrete contract names, sorted.
    pub fn contract_names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    /// Generic contract names with their arity, sorted by name.
    pub fn generic_names(&self) -> impl Iterator<Item = (&str, usize)> {
        self.generics.values().map(|g| (g.name(), g.arity()))
    }

    /// Resolve a contract expression such as `page<envelope<member>>`.
    pub fn resolve(&self, expr: &str) -> Result<Shape, ContractError> {
        let parsed = Parser::new(expr).parse()?;
        self.build(&parsed)
    }

    fn build(&self, expr: &Expr) -> Result<Shape, ContractError> {
        if let Some(shape) = self.shapes.get(&expr.canonical()) {
            return Ok(shape.clone());
        }
        if expr.args.is_empty() {
            return Err(ContractError::UnknownContract(expr.name.clone()));
        }
        let generic = self.generic(&expr.name)?;
        let args = expr
            .args
            .iter()
            .map(|arg| self.build(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(generic.instantiate(&args)?)
    }
}

/// Parsed contract expression.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Expr {
    name: String,
    args: Vec<Expr>,
}

impl Expr {
    fn canonical(&self) -> String {
        if self.args.is_empty() {
            return self.name.clone();
        }
        let args = self
            .args
            .iter()
            .map(Expr::canonical)
            .collect::<Vec<_>>()
            .join(",");
        format!("{}<{}>", self.name, args)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn parse(mut self) -> Result<Expr, ContractError> {
        let expr = self.expr()?;
        self.skip_whitespace();
        match self.chars.next() {
            None => Ok(expr),
            Some((at, c)) => Err(self.error(format!("unexpected '{c}' at {at}"))),
        }
    }

    fn expr(&mut self) -> Result<Expr, ContractError> {
        self.skip_whitespace();
        let name = self.name()?;
        self.skip_whitespace();
        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.expr()?);
                self.skip_whitespace();
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>'".to_string()));
            }
        }
        Ok(Expr { name, args })
    }

    fn name(&mut self) -> Result<String, ContractError> {
        let mut name = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(self.error("expected a contract name".to_string()));
        }
        Ok(name)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek().map(|&(_, c)| c) == Some(expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.chars.peek().is_some_and(|&(_, c)| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn error(&self, reason: String) -> ContractError {
        ContractError::Parse {
            expr: self.source.to_string(),
            reason,
        }
    }
}
