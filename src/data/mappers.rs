//! Wire-to-model mapping for archive responses.
//!
//! The archive API is loosely typed: most metadata fields arrive as
//! either a single string or an array of strings, sizes arrive as
//! decimal strings, and descriptions carry markup. Everything is
//! normalized here so the rest of the crate only sees clean models.

use serde::Deserialize;

use crate::data::models::{Item, ItemDetail, ItemFile, MediaType};

/// A field that is serialized as either one string or many.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrSeq {
    One(String),
    Many(Vec<String>),
}

impl StringOrSeq {
    /// First entry, trimmed; `None` when empty.
    pub fn first(&self) -> Option<String> {
        let value = match self {
            StringOrSeq::One(value) => value.as_str(),
            StringOrSeq::Many(values) => values.first().map(String::as_str).unwrap_or(""),
        };
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// All entries joined with `", "`.
    pub fn joined(&self) -> String {
        match self {
            StringOrSeq::One(value) => value.trim().to_string(),
            StringOrSeq::Many(values) => values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub response: SearchBody,
}

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
pub struct SearchDoc {
    pub identifier: String,
    pub title: Option<StringOrSeq>,
    pub creator: Option<StringOrSeq>,
    pub mediatype: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MetadataResponse {
    pub metadata: MetadataFields,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MetadataFields {
    pub identifier: String,
    pub title: Option<StringOrSeq>,
    pub creator: Option<StringOrSeq>,
    pub description: Option<StringOrSeq>,
    pub mediatype: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub format: Option<String>,
    pub size: Option<String>,
}

/// Formats the client can actually open, per media type.
const READABLE_FORMATS: &[&str] = &["Text PDF", "EPUB", "DjVuTXT", "Kindle"];
const PLAYABLE_FORMATS: &[&str] = &["VBR MP3", "128Kbps MP3", "64Kbps MP3", "Ogg Vorbis", "Flac"];

pub fn cover_url(identifier: &str) -> String {
    format!("https://archive.org/services/img/{identifier}")
}

fn download_url(identifier: &str, file_name: &str) -> String {
    format!("https://archive.org/download/{identifier}/{file_name}")
}

fn media_type_of(raw: &str) -> Option<MediaType> {
    match raw {
        "texts" => Some(MediaType::Texts),
        "audio" | "etree" => Some(MediaType::Audio),
        _ => None,
    }
}

/// Shouty all-caps titles are common in the catalog; bring them down to
/// sentence case, leaving mixed-case titles untouched.
fn normalize_title(title: &str) -> String {
    let has_letters = title.chars().any(|c| c.is_alphabetic());
    let all_upper = title
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(|c| c.is_uppercase());
    if !has_letters || !all_upper {
        return title.to_string();
    }
    let lowered = title.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => lowered,
    }
}

/// Strip markup tags from a description, collapsing runs of whitespace.
fn strip_markup(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map search docs to items, dropping records that are neither text nor
/// audio or that have no usable title.
pub fn map_search_docs(docs: Vec<SearchDoc>) -> Vec<Item> {
    docs.into_iter()
        .filter_map(|doc| {
            let media_type = media_type_of(doc.mediatype.as_deref()?)?;
            let title = doc.title.as_ref().map(|t| t.joined()).unwrap_or_default();
            if title.is_empty() {
                return None;
            }
            let cover_url = cover_url(&doc.identifier);
            Some(Item {
                title: normalize_title(&title),
                creator: doc.creator.as_ref().and_then(StringOrSeq::first),
                media_type,
                cover_url,
                id: doc.identifier,
            })
        })
        .collect()
}

/// Map an item's metadata response, keeping only the files this client
/// can read or play.
pub fn map_metadata(response: MetadataResponse) -> ItemDetail {
    let fields = response.metadata;
    let media_type = fields
        .mediatype
        .as_deref()
        .and_then(media_type_of)
        .unwrap_or(MediaType::Texts);
    let formats: &[&str] = match media_type {
        MediaType::Texts => READABLE_FORMATS,
        MediaType::Audio => PLAYABLE_FORMATS,
    };
    let files = response
        .files
        .into_iter()
        .filter_map(|entry| {
            let format = entry.format?;
            if !formats.contains(&format.as_str()) {
                return None;
            }
            Some(ItemFile {
                download_url: download_url(&fields.identifier, &entry.name),
                size: entry.size.and_then(|s| s.parse().ok()),
                name: entry.name,
                format,
            })
        })
        .collect();

    let title = fields
        .title
        .as_ref()
        .map(|t| t.joined())
        .unwrap_or_else(|| fields.identifier.clone());
    ItemDetail {
        title: normalize_title(&title),
        creator: fields.creator.as_ref().and_then(StringOrSeq::first),
        description: fields
            .description
            .as_ref()
            .map(|d| strip_markup(&d.joined()))
            .unwrap_or_default(),
        media_type,
        cover_url: cover_url(&fields.identifier),
        files,
        id: fields.identifier,
    }
}

/// The item summary embedded in a detail, for catalog upserts.
pub fn item_of_detail(detail: &ItemDetail) -> Item {
    Item {
        id: detail.id.clone(),
        title: detail.title.clone(),
        creator: detail.creator.clone(),
        media_type: detail.media_type,
        cover_url: detail.cover_url.clone(),
    }
}
