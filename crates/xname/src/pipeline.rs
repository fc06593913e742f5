//! The generation pipeline: filter, resolve, generate, name.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;
use xname_codegen::{AccessorGenerator, CodeGenerator};
use xname_core::{GeneratedPartialClass, TargetLanguage};
use xname_resolver::{NameResolver, TypeResolver, ViewResolver};

use crate::error::Result;
use crate::glob::GlobMatcherGroup;
use crate::options::{GeneratorOptions, NamingStrategy};

/// Extensions of documents that can carry views.
pub const VIEW_EXTENSIONS: [&str; 3] = [".xaml", ".axaml", ".paml"];

/// One input document as supplied by the build host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: String,
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

impl<P: Into<String>, T: Into<String>> From<(P, T)> for Document {
    fn from((path, text): (P, T)) -> Self {
        Self::new(path, text)
    }
}

/// A configured generator run over batches of documents.
pub struct GenerationPipeline {
    naming: NamingStrategy,
    language: TargetLanguage,
    path_filter: GlobMatcherGroup,
    namespace_filter: GlobMatcherGroup,
    views: ViewResolver,
    names: NameResolver,
    generator: AccessorGenerator,
}

impl GenerationPipeline {
    /// Build a pipeline. Globs are compiled and templates registered here, so
    /// configuration problems surface before any document is read.
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        let path_filter = GlobMatcherGroup::new(&options.filter_by_path)?;
        let namespace_filter = GlobMatcherGroup::new(&options.filter_by_namespace)?;
        let types = TypeResolver::new(options.xmlns_map());
        let generator = AccessorGenerator::new(options.behavior, options.codegen_options())?;

        debug!(
            behavior = %options.behavior,
            language = %options.language,
            naming = %options.naming_strategy,
            "generation pipeline configured"
        );

        Ok(Self {
            naming: options.naming_strategy,
            language: options.language,
            path_filter,
            namespace_filter,
            views: ViewResolver::new(types.clone()),
            names: NameResolver::new(types, options.language, options.default_field_modifier),
            generator,
        })
    }

    /// Generate one partial class per view, in input order.
    ///
    /// The first malformed or unresolvable document fails the whole batch.
    #[tracing::instrument(name = "xname.generate", level = "debug", skip_all, fields(documents = documents.len()))]
    pub fn generate(&self, documents: &[Document]) -> Result<Vec<GeneratedPartialClass>> {
        let eligible = self.eligible(documents);

        #[cfg(feature = "parallel")]
        let outputs: Result<Vec<_>> = eligible.par_iter().map(|doc| self.process(doc)).collect();
        #[cfg(not(feature = "parallel"))]
        let outputs: Result<Vec<_>> = eligible.iter().map(|doc| self.process(doc)).collect();

        Ok(outputs?.into_iter().flatten().collect())
    }

    /// Like [`generate`](Self::generate), but reports each document separately.
    ///
    /// Returns one entry per document that produced output or failed, keyed by
    /// path. Excluded documents have no entry.
    #[tracing::instrument(name = "xname.generate_each", level = "debug", skip_all, fields(documents = documents.len()))]
    pub fn generate_each<'d>(&self, documents: &'d [Document]) -> Vec<(&'d str, Result<GeneratedPartialClass>)> {
        let eligible = self.eligible(documents);

        #[cfg(feature = "parallel")]
        let outputs: Vec<_> = eligible.par_iter().map(|doc| (doc.path.as_str(), self.process(doc))).collect();
        #[cfg(not(feature = "parallel"))]
        let outputs: Vec<_> = eligible.iter().map(|doc| (doc.path.as_str(), self.process(doc))).collect();

        outputs
            .into_iter()
            .filter_map(|(path, result)| result.transpose().map(|result| (path, result)))
            .collect()
    }

    /// Documents whose path has a view extension and passes the path filter.
    fn eligible<'d>(&self, documents: &'d [Document]) -> Vec<&'d Document> {
        documents
            .iter()
            .filter(|doc| {
                let path = doc.path.replace('\\', "/");
                if !VIEW_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
                    debug!(path = %doc.path, reason = "extension", "skipping document");
                    false
                } else if !self.path_filter.matches(&path) {
                    debug!(path = %doc.path, reason = "path filter", "skipping document");
                    false
                } else {
                    true
                }
            })
            .collect()
    }

    fn process(&self, document: &Document) -> Result<Option<GeneratedPartialClass>> {
        let Some(view) = self.views.resolve_view(&document.text)? else {
            debug!(path = %document.path, reason = "no x:Class", "skipping document");
            return Ok(None);
        };
        if !self.namespace_filter.matches(&view.namespace) {
            debug!(
                path = %document.path,
                namespace = %view.namespace,
                reason = "namespace filter",
                "skipping document"
            );
            return Ok(None);
        }

        let names = self.names.resolve_names(&view.document)?;
        let content = self
            .generator
            .generate_code(&view.class_name, &view.namespace, &view.root_type, &names)?;
        let file_name = self.naming.file_name(&view.class_name, &view.namespace, self.language);

        debug!(path = %document.path, file_name = %file_name, names = names.len(), "generated partial class");
        Ok(Some(GeneratedPartialClass { file_name, content }))
    }
}
