use anyhow::{anyhow, Context, Result};
use fluent_bundle::{concurrent::FluentBundle, FluentResource};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::i18n::language::SupportedLanguage;

pub type Bundle = FluentBundle<FluentResource>;

/// Loads and manages Fluent translation resources
pub struct FluentLoader {
    locales_dir: PathBuf,
    bundles: HashMap<SupportedLanguage, Bundle>,
}

impl FluentLoader {
    pub fn new(locales_dir: impl Into<PathBuf>) -> Self {
        Self {
            locales_dir: locales_dir.into(),
            bundles: HashMap::new(),
        }
    }

    /// Load all FTL files for a specific locale, seeding the directory with
    /// the built-in messages when it has none.
    pub async fn load_locale(&mut self, language: SupportedLanguage) -> Result<()> {
        let locale_dir = self.locales_dir.join(language.code());

        if !locale_dir.exists() {
            tokio::fs::create_dir_all(&locale_dir)
                .await
                .with_context(|| format!("Failed to create locale directory: {:?}", locale_dir))?;
        }

        let mut sources = Vec::new();
        let mut entries = tokio::fs::read_dir(&locale_dir)
            .await
            .with_context(|| format!("Failed to read locale directory: {:?}", locale_dir))?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("ftl") {
                let content = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read file: {:?}", path))?;
                sources.push((path, content));
            }
        }

        if sources.is_empty() {
            let path = self.create_default_ftl_file(&locale_dir, language).await?;
            sources.push((path, default_ftl(language).to_string()));
        }

        tracing::info!("Loaded {} FTL files for locale {}", sources.len(), language.code());

        let bundle = build_bundle(language, sources)?;
        self.bundles.insert(language, bundle);
        Ok(())
    }

    /// Load the messages compiled into the binary, without touching disk.
    pub fn load_builtin(&mut self, language: SupportedLanguage) -> Result<()> {
        let source = (PathBuf::from("<builtin>"), default_ftl(language).to_string());
        let bundle = build_bundle(language, vec![source])?;
        self.bundles.insert(language, bundle);
        Ok(())
    }

    /// Get a bundle for a specific language
    pub fn get_bundle(&self, language: &SupportedLanguage) -> Option<&Bundle> {
        self.bundles.get(language)
    }

    async fn create_default_ftl_file(
        &self,
        locale_dir: &Path,
        language: SupportedLanguage,
    ) -> Result<PathBuf> {
        let file_path = locale_dir.join("common.ftl");

        tokio::fs::write(&file_path, default_ftl(language))
            .await
            .with_context(|| format!("Failed to create default FTL file: {:?}", file_path))?;

        tracing::info!("Created default FTL file: {:?}", file_path);
        Ok(file_path)
    }
}

fn default_ftl(language: SupportedLanguage) -> &'static str {
    match language {
        SupportedLanguage::Portuguese => include_str!("../../locales/pt-BR/common.ftl.template"),
        SupportedLanguage::English => include_str!("../../locales/en/common.ftl.template"),
    }
}

fn build_bundle(language: SupportedLanguage, sources: Vec<(PathBuf, String)>) -> Result<Bundle> {
    let mut bundle = FluentBundle::new_concurrent(vec![language.lang_id()]);
    // No bidi isolation marks around placeables.
    bundle.set_use_isolating(false);

    for (path, content) in sources {
        let resource = FluentResource::try_new(content).map_err(|(_, errors)| {
            anyhow!("Failed to parse FTL file {:?}: {:?}", path, errors)
        })?;

        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Failed to add resource to bundle: {:?}", errors))?;
    }

    Ok(bundle)
}
