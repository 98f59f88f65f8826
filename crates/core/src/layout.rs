use std::path::{Path, PathBuf};

use crate::model::{CardId, Category};

/// Directory name the resource tree lives under when rooted at the site.
pub const DEFAULT_RESOURCE_DIR: &str = "MemCard-resource";

/// Path conventions for every resource the engine and the front end share.
///
/// One instance is built from the resource root and passed into the
/// components that touch files; nothing else hard-codes a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayout {
    resource_root: PathBuf,
}

impl ResourceLayout {
    #[must_use]
    pub fn new(resource_root: impl Into<PathBuf>) -> Self {
        Self {
            resource_root: resource_root.into(),
        }
    }

    /// Layout rooted at the conventional directory under the site root.
    #[must_use]
    pub fn under_site_root(site_root: &Path) -> Self {
        Self::new(site_root.join(DEFAULT_RESOURCE_DIR))
    }

    #[must_use]
    pub fn resource_root(&self) -> &Path {
        &self.resource_root
    }

    #[must_use]
    pub fn media_root(&self) -> PathBuf {
        self.resource_root.join("media")
    }

    #[must_use]
    pub fn image_dir(&self) -> PathBuf {
        self.media_root().join("images")
    }

    #[must_use]
    pub fn audio_dir(&self) -> PathBuf {
        self.media_root().join("audio")
    }

    #[must_use]
    pub fn subtitle_dir(&self) -> PathBuf {
        self.media_root().join("subtitles")
    }

    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.resource_root.join("config")
    }

    /// Directory holding the generated per-category files.
    #[must_use]
    pub fn runtime_dir(&self) -> PathBuf {
        self.resource_root.join("runtime")
    }

    /// The card-list definition file.
    #[must_use]
    pub fn card_list_file(&self) -> PathBuf {
        self.config_dir().join("card-list.txt")
    }

    /// The study configuration file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join("memcard2025.cfg")
    }

    /// The sorted category index generated at initialization.
    #[must_use]
    pub fn category_index_file(&self) -> PathBuf {
        self.runtime_dir().join("existing-category.tmp")
    }

    /// One category's default card order, generated at initialization.
    #[must_use]
    pub fn category_sequence_file(&self, category: &Category) -> PathBuf {
        self.runtime_dir()
            .join(format!("current-category-{category}.tmp"))
    }

    #[must_use]
    pub fn image_path(&self, card_id: &CardId) -> PathBuf {
        self.image_dir().join(format!("{card_id}.JPG"))
    }

    #[must_use]
    pub fn audio_path(&self, card_id: &CardId) -> PathBuf {
        self.audio_dir().join(format!("{card_id}.mp3"))
    }

    #[must_use]
    pub fn subtitle_path(&self, card_id: &CardId) -> PathBuf {
        self.subtitle_dir().join(format!("{card_id}.txt"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_sequence_file_embeds_category_name() {
        let layout = ResourceLayout::new("res");
        let category = Category::new("colors").unwrap();

        assert_eq!(
            layout.category_sequence_file(&category),
            PathBuf::from("res/runtime/current-category-colors.tmp")
        );
    }

    #[test]
    fn media_paths_use_card_id_and_fixed_extensions() {
        let layout = ResourceLayout::new("res");
        let id = CardId::new("colors-01-red").unwrap();

        assert_eq!(
            layout.image_path(&id),
            PathBuf::from("res/media/images/colors-01-red.JPG")
        );
        assert_eq!(
            layout.audio_path(&id),
            PathBuf::from("res/media/audio/colors-01-red.mp3")
        );
        assert_eq!(
            layout.subtitle_path(&id),
            PathBuf::from("res/media/subtitles/colors-01-red.txt")
        );
    }

    #[test]
    fn site_rooted_layout_uses_conventional_directory() {
        let layout = ResourceLayout::under_site_root(Path::new("site"));
        assert_eq!(
            layout.card_list_file(),
            PathBuf::from("site/MemCard-resource/config/card-list.txt")
        );
        assert_eq!(
            layout.category_index_file(),
            PathBuf::from("site/MemCard-resource/runtime/existing-category.tmp")
        );
    }
}
