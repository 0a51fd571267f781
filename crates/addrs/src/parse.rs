//! target parsing
//!
//! ```text
//! target       = { "module" "." name ["[" index "]"] "." } [ resourcepart ]
//! resourcepart = ["data" "."] type "." name ["[" index "]"]
//! index        = integer | quoted-string
//! name, type   = [A-Za-z_][A-Za-z0-9_]*
//! ```
//!
//! The text is tokenized as an HCL traversal by [hcl_edit] and then walked
//! step by step. Failures are reported as [Diagnostics], never as panics.
use crate::diagnostics::{Diagnostic, Diagnostics, SourcePos, SourceRange};
use crate::error::is_identifier;
use crate::instance_key::InstanceKey;
use crate::module::{ModuleInstance, ModuleInstanceStep};
use crate::resource::{AbsResource, AbsResourceInstance, Resource, ResourceMode};
use crate::targetable::Targetable;
use crate::util::{ExpressionExt, Step, StepKind};
use hcl::Identifier;
use std::ops::Range;

const INVALID_ADDRESS: &str = "Invalid address";
const INVALID_SYNTAX: &str = "Invalid address syntax";

/// A parsed target address and where it was found in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub subject: Targetable,
    pub source_range: Option<SourceRange>,
}

/// Parses a target address such as `module.foo[0].test_resource.bar`
///
/// Surrounding whitespace is ignored, empty input is the root module.
#[tracing::instrument(level = "trace")]
pub fn parse_target_str(text: &str) -> Result<Target, Diagnostics> {
    let source = Source::new(text);
    if source.body.is_empty() {
        return Ok(Target {
            subject: ModuleInstance::root().into(),
            source_range: None,
        });
    }

    source.check_ascii()?;

    let expr = hcl_edit::parser::parse_expr(source.body).map_err(|err| {
        let start = err.location().offset();
        let next_char = source.body[start.min(source.body.len())..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);

        Diagnostics::from(
            Diagnostic::error(INVALID_SYNTAX, err.message())
                .with_subject(source.range(Some(start..start + next_char))),
        )
    })?;

    let steps = expr.traversal_steps(source.body).map_err(|invalid| {
        Diagnostics::from(
            Diagnostic::error(INVALID_ADDRESS, invalid.detail)
                .with_subject(source.range(invalid.span)),
        )
    })?;

    let subject = TargetParser::new(&source, &steps).parse()?;
    tracing::debug!(%subject, kind = %subject.addr_type(), "target parsed");

    Ok(Target {
        subject,
        source_range: source.range(Some(0..source.body.len())),
    })
}

/// Parses a target that must be a module instance
pub fn parse_module_instance_str(text: &str) -> Result<ModuleInstance, Diagnostics> {
    let Target {
        subject,
        source_range,
    } = parse_target_str(text)?;
    match subject {
        Targetable::ModuleInstance(module) => Ok(module),
        _ => Err(unexpected_kind(
            source_range,
            "A module instance address is required here.",
        )),
    }
}

/// Parses a target that must be a resource without instance key
pub fn parse_abs_resource_str(text: &str) -> Result<AbsResource, Diagnostics> {
    let Target {
        subject,
        source_range,
    } = parse_target_str(text)?;
    match subject {
        Targetable::AbsResource(resource) => Ok(resource),
        _ => Err(unexpected_kind(source_range, "A resource address is required here.")),
    }
}

/// Parses a target that must be a resource instance
///
/// A resource without instance key is taken as its single unkeyed instance.
pub fn parse_abs_resource_instance_str(text: &str) -> Result<AbsResourceInstance, Diagnostics> {
    let Target {
        subject,
        source_range,
    } = parse_target_str(text)?;
    match subject {
        Targetable::AbsResourceInstance(instance) => Ok(instance),
        Targetable::AbsResource(resource) => Ok(resource.instance(InstanceKey::NoKey)),
        _ => Err(unexpected_kind(
            source_range,
            "A resource instance address is required here.",
        )),
    }
}

fn unexpected_kind(subject: Option<SourceRange>, detail: &str) -> Diagnostics {
    Diagnostic::error(INVALID_ADDRESS, detail)
        .with_subject(subject)
        .into()
}

/// Input text with surrounding whitespace trimmed off
///
/// Spans into `body` are shifted by `offset` to point into `text`.
struct Source<'s> {
    text: &'s str,
    body: &'s str,
    offset: usize,
}

impl<'s> Source<'s> {
    fn new(text: &'s str) -> Self {
        let body = text.trim();
        Self {
            text,
            body,
            offset: text.len() - text.trim_start().len(),
        }
    }

    fn range(&self, span: Option<Range<usize>>) -> Option<SourceRange> {
        span.map(|span| {
            SourceRange::from_bytes(self.text, span.start + self.offset..span.end + self.offset)
        })
    }

    /// Rejects non-ASCII characters outside of quoted strings
    ///
    /// The tokenizer only handles ASCII in identifiers and operators.
    fn check_ascii(&self) -> Result<(), Diagnostics> {
        let mut in_string = false;
        let mut escaped = false;

        for (index, c) in self.body.char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            if c == '"' {
                in_string = true;
            } else if !c.is_ascii() {
                let detail = format!("Unexpected character {c:?}.");
                return Err(Diagnostic::error(INVALID_SYNTAX, detail)
                    .with_subject(self.range(Some(index..index + c.len_utf8())))
                    .into());
            }
        }

        Ok(())
    }
}

/// Walks flattened traversal steps left to right
struct TargetParser<'s> {
    source: &'s Source<'s>,
    steps: &'s [Step],
    position: usize,
}

impl<'s> TargetParser<'s> {
    fn new(source: &'s Source<'s>, steps: &'s [Step]) -> Self {
        Self {
            source,
            steps,
            position: 0,
        }
    }

    fn parse(mut self) -> Result<Targetable, Diagnostics> {
        let module = self.module_instance()?;

        let Some(first) = self.peek() else {
            return Ok(module.into());
        };

        let subject = self.resource(module, first)?;

        if let Some(extra) = self.peek() {
            return Err(self.error("Unexpected extra operators after address.", extra));
        }

        Ok(subject)
    }

    fn peek(&self) -> Option<&'s Step> {
        self.steps.get(self.position)
    }

    fn next(&mut self) -> Option<&'s Step> {
        let step = self.peek()?;
        self.position += 1;
        Some(step)
    }

    /// Consumes `module.<name>[<key>]` pairs
    fn module_instance(&mut self) -> Result<ModuleInstance, Diagnostics> {
        let mut steps = vec![];

        while let Some(keyword) = self.peek().filter(|step| step.is_keyword("module")) {
            self.position += 1;

            let Some(step) = self.next().filter(|step| step.attr().is_some()) else {
                return Err(self.error(
                    "Prefix \"module.\" must be followed by a module name.",
                    keyword,
                ));
            };

            let name = self.identifier(step)?;
            let key = self.optional_key()?;
            tracing::trace!(name = name.as_str(), ?key, "module step");
            steps.push(ModuleInstanceStep::new(name, key));
        }

        Ok(steps.into())
    }

    /// Consumes `[data.]<type>.<name>[<key>]`
    fn resource(
        &mut self,
        module: ModuleInstance,
        first: &'s Step,
    ) -> Result<Targetable, Diagnostics> {
        let mode = if first.is_keyword("data") {
            self.position += 1;
            ResourceMode::Data
        } else {
            ResourceMode::Managed
        };

        let type_and_name = self
            .next()
            .filter(|step| step.attr().is_some())
            .zip(self.next().filter(|step| step.attr().is_some()));

        let Some((type_, name)) = type_and_name else {
            return Err(self.error(
                "Resource specification must include a resource type and name.",
                first,
            ));
        };

        let resource = Resource::new(mode, self.identifier(type_)?, self.identifier(name)?);
        let abs = resource.absolute(module);

        if !matches!(
            self.peek(),
            Some(Step {
                kind: StepKind::Index(_),
                ..
            })
        ) {
            return Ok(abs.into());
        }

        let key = self.optional_key()?;
        Ok(abs.instance(key).into())
    }

    /// Consumes an index step if there is one
    fn optional_key(&mut self) -> Result<InstanceKey, Diagnostics> {
        let Some(step) = self.peek() else {
            return Ok(InstanceKey::NoKey);
        };

        let StepKind::Index(key) = &step.kind else {
            return Ok(InstanceKey::NoKey);
        };

        self.position += 1;
        key.clone().map_err(|detail| self.error(detail, step))
    }

    /// Name or type of an attribute step
    fn identifier(&self, step: &Step) -> Result<Identifier, Diagnostics> {
        match step.attr() {
            Some(name) if is_identifier(name) => Ok(Identifier::unchecked(name)),
            _ => Err(self.error(
                "A name must start with a letter or underscore and may contain only letters, digits and underscores.",
                step,
            )),
        }
    }

    fn error(&self, detail: &str, step: &Step) -> Diagnostics {
        Diagnostic::error(INVALID_ADDRESS, detail)
            .with_subject(self.source.range(step.span.clone()))
            .into()
    }
}
