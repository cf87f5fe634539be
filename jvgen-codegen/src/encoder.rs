//! Schema-tree walker.
//!
//! [`Encoder`] walks the schemas of a [`Registry`] depth first and calls out
//! to an [`Emitter`] to produce code for the target language. Children are
//! always emitted before their parent, so a parent's source can refer to
//! the names generated for its children.

use crate::descriptor::{Array, NameMap, Struct, Union, Values, Variant};
use crate::emitter::Emitter;
use crate::error::CodegenError;
use crate::path::{NamePath, Segment};
use jvgen_schema::{Discriminator, PrimitiveType, Registry, Schema, SchemaKind, SchemaMap};
use std::io::Write;

/// Drives code generation for every schema in a registry.
pub struct Encoder<'a, W, E> {
    out: W,
    registry: &'a Registry,
    emitter: E,
}

impl<'a, W: Write, E: Emitter> Encoder<'a, W, E> {
    /// Creates an encoder writing to `out`.
    #[must_use]
    pub fn new(out: W, registry: &'a Registry, emitter: E) -> Self {
        Self {
            out,
            registry,
            emitter,
        }
    }

    /// Generates code for every root schema, in registry order.
    ///
    /// Stops at the first error. Output written before the failure is left
    /// in the sink.
    ///
    /// # Errors
    /// Returns `CodegenError` if a discriminator mapping holds a non-struct
    /// schema or the emitter fails.
    pub fn run(&mut self) -> Result<(), CodegenError> {
        let registry = self.registry;
        for root in registry.schemas() {
            let mut path = NamePath::new(root.id.clone());
            let name = self.resolve(&mut path, &root.schema)?;
            tracing::debug!("schema {} resolved to {}", root.id, name);
        }
        self.out.flush().map_err(crate::error::EmitError::from)?;
        Ok(())
    }

    /// Resolves one schema node, emitting any composite types it needs, and
    /// returns the name that refers to it.
    ///
    /// `path` is restored to its original length before returning, whether
    /// or not resolution succeeds.
    ///
    /// # Errors
    /// Returns `CodegenError` if a discriminator mapping holds a non-struct
    /// schema or the emitter fails.
    pub fn resolve(&mut self, path: &mut NamePath, schema: &Schema) -> Result<String, CodegenError> {
        match schema {
            Schema::Empty => Ok(self.emitter.primitive_empty()),
            Schema::Type(prim) => Ok(self.primitive(*prim)),
            Schema::Elements(inner) => {
                let elements = self.descend(path, Segment::Elements, inner)?;
                let name = self.emitter.emit_array(
                    &mut self.out,
                    &Array {
                        path: &*path,
                        elements,
                    },
                )?;
                tracing::trace!("emitted array {} at {}", name, path);
                Ok(name)
            }
            Schema::Properties(props) => {
                let required = self.resolve_members(path, &props.required)?;
                let optional = self.resolve_members(path, &props.optional)?;
                let name = self.emitter.emit_struct(
                    &mut self.out,
                    &Struct {
                        path: &*path,
                        required,
                        optional,
                    },
                )?;
                tracing::trace!("emitted struct {} at {}", name, path);
                Ok(name)
            }
            Schema::Values(inner) => {
                let values = self.descend(path, Segment::Values, inner)?;
                let name = self.emitter.emit_values(
                    &mut self.out,
                    &Values {
                        path: &*path,
                        values,
                    },
                )?;
                tracing::trace!("emitted values {} at {}", name, path);
                Ok(name)
            }
            Schema::Discriminator(disc) => {
                path.push(Segment::Variants);
                let variants = self.resolve_variants(path, disc);
                path.pop();

                let name = self.emitter.emit_union(
                    &mut self.out,
                    &Union {
                        path: &*path,
                        variants: variants?,
                    },
                )?;
                tracing::trace!("emitted union {} at {}", name, path);
                Ok(name)
            }
        }
    }

    /// Returns the emitter.
    #[must_use]
    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Consumes the encoder, returning the output sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn primitive(&self, prim: PrimitiveType) -> String {
        match prim {
            PrimitiveType::Null => self.emitter.primitive_null(),
            PrimitiveType::Boolean => self.emitter.primitive_boolean(),
            PrimitiveType::Number => self.emitter.primitive_number(),
            PrimitiveType::String => self.emitter.primitive_string(),
        }
    }

    /// Resolves `schema` one segment below `path`.
    fn descend(
        &mut self,
        path: &mut NamePath,
        segment: Segment,
        schema: &Schema,
    ) -> Result<String, CodegenError> {
        path.push(segment);
        let result = self.resolve(path, schema);
        path.pop();
        result
    }

    fn resolve_members(
        &mut self,
        path: &mut NamePath,
        members: &SchemaMap,
    ) -> Result<NameMap, CodegenError> {
        let mut names = NameMap::with_capacity(members.len());
        for (key, schema) in members {
            let name = self.descend(path, Segment::Property(key.clone()), schema)?;
            names.push((key.clone(), name));
        }
        Ok(names)
    }

    /// Emits every variant of `disc`. `path` ends with the variants marker.
    fn resolve_variants(
        &mut self,
        path: &mut NamePath,
        disc: &Discriminator,
    ) -> Result<Vec<String>, CodegenError> {
        // Checked up front so nothing is emitted for a malformed union.
        if let Some((key, schema)) = disc
            .mapping
            .iter()
            .find(|(_, schema)| schema.kind() != SchemaKind::Properties)
        {
            return Err(CodegenError::InvalidMapping {
                key: key.clone(),
                kind: schema.kind(),
            });
        }

        let mut variants = Vec::with_capacity(disc.mapping.len());
        for tag_value in disc.mapping.keys() {
            path.push(Segment::Property(tag_value.clone()));
            let result = self.resolve_variant(path, disc, tag_value);
            path.pop();
            variants.push(result?);
        }
        Ok(variants)
    }

    fn resolve_variant(
        &mut self,
        path: &mut NamePath,
        disc: &Discriminator,
        tag_value: &str,
    ) -> Result<String, CodegenError> {
        // Members come from the discriminator schema itself and are shared by
        // every variant; the mapping entry's own members are not read.
        let required = self.resolve_members(path, &disc.properties.required)?;
        let optional = self.resolve_members(path, &disc.properties.optional)?;

        let name = self.emitter.emit_variant(
            &mut self.out,
            &Variant {
                path: &*path,
                tag_name: disc.tag.clone(),
                tag_value: tag_value.to_string(),
                required,
                optional,
            },
        )?;
        tracing::trace!("emitted variant {} at {}", name, path);
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmitError;
    use jvgen_schema::{Properties, RootSchema, SchemaId};

    /// Emitter that records every call and names types after their path.
    #[derive(Default)]
    struct RecordingEmitter {
        events: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl RecordingEmitter {
        fn failing_on(kind: &'static str) -> Self {
            Self {
                events: Vec::new(),
                fail_on: Some(kind),
            }
        }

        fn record(
            &mut self,
            out: &mut dyn Write,
            kind: &'static str,
            path: &NamePath,
            detail: String,
        ) -> Result<String, EmitError> {
            if self.fail_on == Some(kind) {
                return Err(EmitError::render(format!("refusing {kind}")));
            }
            let name = format!("{kind}({path})");
            let event = format!("{name} <- {detail}");
            writeln!(out, "{event}")?;
            self.events.push(event);
            Ok(name)
        }
    }

    fn join(map: &NameMap) -> String {
        map.iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    impl Emitter for RecordingEmitter {
        fn primitive_empty(&self) -> String {
            "any".to_string()
        }

        fn primitive_null(&self) -> String {
            "null".to_string()
        }

        fn primitive_boolean(&self) -> String {
            "bool".to_string()
        }

        fn primitive_number(&self) -> String {
            "num".to_string()
        }

        fn primitive_string(&self) -> String {
            "str".to_string()
        }

        fn emit_struct(
            &mut self,
            out: &mut dyn Write,
            strukt: &Struct<'_>,
        ) -> Result<String, EmitError> {
            let detail = format!("[{}] [{}]", join(&strukt.required), join(&strukt.optional));
            self.record(out, "struct", strukt.path, detail)
        }

        fn emit_array(
            &mut self,
            out: &mut dyn Write,
            array: &Array<'_>,
        ) -> Result<String, EmitError> {
            self.record(out, "array", array.path, array.elements.clone())
        }

        fn emit_values(
            &mut self,
            out: &mut dyn Write,
            values: &Values<'_>,
        ) -> Result<String, EmitError> {
            self.record(out, "values", values.path, values.values.clone())
        }

        fn emit_variant(
            &mut self,
            out: &mut dyn Write,
            variant: &Variant<'_>,
        ) -> Result<String, EmitError> {
            let detail = format!(
                "{}={} [{}] [{}]",
                variant.tag_name,
                variant.tag_value,
                join(&variant.required),
                join(&variant.optional)
            );
            self.record(out, "variant", variant.path, detail)
        }

        fn emit_union(
            &mut self,
            out: &mut dyn Write,
            union: &Union<'_>,
        ) -> Result<String, EmitError> {
            self.record(out, "union", union.path, union.variants.join("|"))
        }
    }

    fn registry(schemas: Vec<(&str, Schema)>) -> Registry {
        Registry::new(
            schemas
                .into_iter()
                .map(|(id, schema)| RootSchema::new(id, schema))
                .collect(),
        )
        .expect("Failed to build registry")
    }

    fn run(registry: &Registry) -> (Result<(), CodegenError>, Vec<String>, String) {
        let mut encoder = Encoder::new(Vec::new(), registry, RecordingEmitter::default());
        let result = encoder.run();
        let events = encoder.emitter().events.clone();
        let out = String::from_utf8(encoder.into_inner()).expect("utf8 output");
        (result, events, out)
    }

    #[test]
    fn test_primitives_emit_nothing() {
        let registry = registry(vec![
            ("empty", Schema::Empty),
            ("null", PrimitiveType::Null.into()),
            ("string", PrimitiveType::String.into()),
        ]);
        let (result, events, out) = run(&registry);

        assert!(result.is_ok());
        assert!(events.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_elements_of_string() {
        let registry = registry(vec![(
            "root",
            Schema::elements(PrimitiveType::String.into()),
        )]);
        let (result, events, _) = run(&registry);

        assert!(result.is_ok());
        assert_eq!(events, vec!["array(root#) <- str"]);
    }

    #[test]
    fn test_struct_required_and_optional() {
        let schema = Properties::new()
            .required("name", PrimitiveType::String.into())
            .optional("age", PrimitiveType::Number.into());
        let registry = registry(vec![("root", schema.into())]);
        let (result, events, _) = run(&registry);

        assert!(result.is_ok());
        assert_eq!(events, vec!["struct(root#) <- [name:str] [age:num]"]);
    }

    #[test]
    fn test_children_emitted_before_parent() {
        let schema = Properties::new()
            .required("tags", Schema::elements(PrimitiveType::String.into()))
            .optional(
                "meta",
                Schema::values(Properties::new().required("x", PrimitiveType::Boolean.into()).into()),
            );
        let registry = registry(vec![("root", schema.into())]);
        let (result, events, _) = run(&registry);

        assert!(result.is_ok());
        assert_eq!(
            events,
            vec![
                "array(root#/tags) <- str",
                "struct(root#/meta/values) <- [x:bool] []",
                "values(root#/meta) <- struct(root#/meta/values)",
                "struct(root#) <- [tags:array(root#/tags)] [meta:values(root#/meta)]",
            ]
        );
    }

    #[test]
    fn test_discriminator_emits_variants_then_union() {
        let disc = Discriminator::new("type")
            .variant("a", Properties::new().into())
            .variant("b", Properties::new().into());
        let registry = registry(vec![("root", disc.into())]);
        let (result, events, _) = run(&registry);

        assert!(result.is_ok());
        assert_eq!(
            events,
            vec![
                "variant(root#/variants/a) <- type=a [] []",
                "variant(root#/variants/b) <- type=b [] []",
                "union(root#) <- variant(root#/variants/a)|variant(root#/variants/b)",
            ]
        );
    }

    #[test]
    fn test_variants_use_discriminator_properties() {
        let disc = Discriminator::new("kind")
            .variant(
                "circle",
                Properties::new()
                    .required("radius", PrimitiveType::Number.into())
                    .into(),
            )
            .with_properties(
                Properties::new()
                    .required("id", PrimitiveType::String.into())
                    .optional("tags", Schema::elements(PrimitiveType::String.into())),
            );
        let registry = registry(vec![("root", disc.into())]);
        let (result, events, _) = run(&registry);

        assert!(result.is_ok());
        assert_eq!(
            events,
            vec![
                "array(root#/variants/circle/tags) <- str",
                "variant(root#/variants/circle) <- kind=circle [id:str] \
                 [tags:array(root#/variants/circle/tags)]",
                "union(root#) <- variant(root#/variants/circle)",
            ]
        );
    }

    #[test]
    fn test_invalid_mapping_emits_nothing_for_union() {
        let disc = Discriminator::new("type")
            .variant("a", Properties::new().into())
            .variant("b", Schema::elements(PrimitiveType::String.into()));
        let registry = registry(vec![("root", disc.into())]);
        let (result, events, out) = run(&registry);

        match result {
            Err(CodegenError::InvalidMapping { key, kind }) => {
                assert_eq!(key, "b");
                assert_eq!(kind, SchemaKind::Elements);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(events.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_path_restored_after_success_and_failure() {
        let registry = Registry::default();
        let mut encoder = Encoder::new(Vec::new(), &registry, RecordingEmitter::default());
        let mut path = NamePath::new(SchemaId::new("root"));
        path.push(Segment::Property("outer".to_string()));

        let ok = Properties::new()
            .required("list", Schema::elements(Schema::values(Schema::Empty)))
            .into();
        encoder.resolve(&mut path, &ok).expect("resolves");
        assert_eq!(path.len(), 1);

        let bad_union: Schema = Discriminator::new("t")
            .variant("x", PrimitiveType::Null.into())
            .into();
        let bad = Schema::elements(Properties::new().required("u", bad_union).into());
        encoder.resolve(&mut path, &bad).expect_err("invalid mapping");
        assert_eq!(path.segments(), &[Segment::Property("outer".to_string())]);
    }

    #[test]
    fn test_path_restored_after_emitter_failure() {
        let registry = Registry::default();
        let mut encoder = Encoder::new(
            Vec::new(),
            &registry,
            RecordingEmitter::failing_on("variant"),
        );
        let mut path = NamePath::new(SchemaId::new("root"));

        let schema: Schema = Discriminator::new("t")
            .variant("x", Properties::new().into())
            .into();
        let err = encoder
            .resolve(&mut path, &Schema::values(schema))
            .expect_err("emitter refuses variants");
        assert!(matches!(err, CodegenError::Emit(EmitError::Render { .. })));
        assert!(path.is_empty());
    }

    #[test]
    fn test_first_error_aborts_run_and_keeps_output() {
        let registry = registry(vec![
            ("first", Schema::elements(PrimitiveType::Number.into())),
            (
                "second",
                Discriminator::new("t").variant("x", Schema::Empty).into(),
            ),
            ("third", Schema::elements(PrimitiveType::String.into())),
        ]);
        let (result, events, out) = run(&registry);

        assert!(matches!(result, Err(CodegenError::InvalidMapping { .. })));
        assert_eq!(events, vec!["array(first#) <- num"]);
        assert_eq!(out, "array(first#) <- num\n");
    }

    #[test]
    fn test_emitter_failure_propagates() {
        let registry = registry(vec![(
            "root",
            Properties::new()
                .required("list", Schema::elements(Schema::Empty))
                .into(),
        )]);
        let mut encoder = Encoder::new(
            Vec::new(),
            &registry,
            RecordingEmitter::failing_on("struct"),
        );

        let err = encoder.run().expect_err("emitter refuses structs");
        assert_eq!(err.to_string(), "render error: refusing struct");
        assert_eq!(encoder.emitter().events, vec!["array(root#/list) <- any"]);
    }

    /// Sink that rejects every write.
    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_propagates() {
        let registry = registry(vec![(
            "root",
            Schema::elements(PrimitiveType::String.into()),
        )]);
        let mut encoder = Encoder::new(FailingSink, &registry, RecordingEmitter::default());

        let err = encoder.run().expect_err("sink rejects writes");
        match err {
            CodegenError::Emit(EmitError::Io(e)) => {
                assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_path_restored_after_sink_failure() {
        let registry = Registry::default();
        let mut encoder = Encoder::new(FailingSink, &registry, RecordingEmitter::default());
        let mut path = NamePath::new(SchemaId::new("root"));
        path.push(Segment::Property("outer".to_string()));

        let schema = Properties::new()
            .required("list", Schema::elements(PrimitiveType::Number.into()))
            .into();
        let err = encoder
            .resolve(&mut path, &schema)
            .expect_err("sink rejects writes");
        assert!(matches!(err, CodegenError::Emit(EmitError::Io(_))));
        assert_eq!(path.segments(), &[Segment::Property("outer".to_string())]);
        assert!(encoder.emitter().events.is_empty());
    }

    #[test]
    fn test_boxed_emitter() {
        let registry = registry(vec![("root", Schema::values(PrimitiveType::Boolean.into()))]);
        let emitter: Box<RecordingEmitter> = Box::default();
        let mut encoder = Encoder::new(Vec::new(), &registry, emitter);

        encoder.run().expect("runs");
        assert_eq!(encoder.emitter().events, vec!["values(root#) <- bool"]);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let disc = Discriminator::new("type")
            .variant("z", Properties::new().into())
            .variant("a", Properties::new().into())
            .with_properties(
                Properties::new()
                    .required("b", PrimitiveType::String.into())
                    .required("a", Schema::elements(Schema::Empty)),
            );
        let registry = registry(vec![("root", disc.into())]);

        let (first, first_events, first_out) = run(&registry);
        let (second, second_events, second_out) = run(&registry);
        assert!(first.is_ok() && second.is_ok());
        assert_eq!(first_events, second_events);
        assert_eq!(first_out, second_out);
    }
}
