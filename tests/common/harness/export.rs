//! Builder for export archives with a manifest and content files.

// Not every test binary uses every builder method
#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use serde_json::{Value, json};
use zip::ZipWriter;
use zip::write::FileOptions;

/// One manifest entry, with optional children.
#[derive(Debug, Clone)]
pub struct TestEntry {
    value: Value,
    children: Vec<TestEntry>,
}

impl TestEntry {
    /// Creates an entry of the given note type.
    pub fn new(note_type: &str, id: &str, title: &str) -> Self {
        Self {
            value: json!({ "noteId": id, "title": title, "type": note_type }),
            children: Vec::new(),
        }
    }

    /// A text note backed by `file`.
    pub fn text(id: &str, title: &str, file: &str) -> Self {
        Self::new("text", id, title).data_file(file)
    }

    /// A book whose children live in `dir`.
    pub fn book(id: &str, title: &str, dir: &str) -> Self {
        Self::new("book", id, title).dir_file(dir)
    }

    /// Sets `dataFileName`.
    pub fn data_file(self, file: &str) -> Self {
        self.field("dataFileName", json!(file))
    }

    /// Sets `dirFileName`.
    pub fn dir_file(self, dir: &str) -> Self {
        self.field("dirFileName", json!(dir))
    }

    /// Sets `mime`.
    pub fn mime(self, mime: &str) -> Self {
        self.field("mime", json!(mime))
    }

    /// Marks the entry as a clone.
    pub fn as_clone(self) -> Self {
        self.field("isClone", json!(true))
    }

    /// Sets an arbitrary field.
    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.value[key] = value;
        self
    }

    /// Appends a child entry.
    pub fn child(mut self, child: TestEntry) -> Self {
        self.children.push(child);
        self
    }

    fn to_json(&self) -> Value {
        let mut value = self.value.clone();
        value["children"] = self.children.iter().map(TestEntry::to_json).collect();
        value
    }
}

/// An export under construction: manifest entries plus raw files.
#[derive(Debug, Default)]
pub struct TestExport {
    entries: Vec<TestEntry>,
    files: Vec<(String, Vec<u8>)>,
    raw_manifest: Option<String>,
    omit_manifest: bool,
}

impl TestExport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level manifest entry.
    pub fn entry(mut self, entry: TestEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Adds a content file at an archive-relative path.
    pub fn file(mut self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.files.push((path.to_string(), contents.as_ref().to_vec()));
        self
    }

    /// Uses `manifest` verbatim instead of the generated one.
    pub fn raw_manifest(mut self, manifest: &str) -> Self {
        self.raw_manifest = Some(manifest.to_string());
        self
    }

    /// Leaves the manifest out of the archive.
    pub fn without_manifest(mut self) -> Self {
        self.omit_manifest = true;
        self
    }

    /// Returns the manifest JSON.
    pub fn manifest(&self) -> String {
        self.raw_manifest.clone().unwrap_or_else(|| {
            let files: Vec<Value> = self.entries.iter().map(TestEntry::to_json).collect();
            json!({ "formatVersion": 2, "appVersion": "0.0.0", "files": files }).to_string()
        })
    }

    /// Writes the export as a zip archive at `path`.
    pub fn write_zip(&self, path: &Path) {
        let file = std::fs::File::create(path).expect("Failed to create archive");
        let mut zip = ZipWriter::new(file);
        let options = FileOptions::default();

        if !self.omit_manifest {
            zip.start_file("!!!meta.json", options).expect("Failed to start manifest");
            zip.write_all(self.manifest().as_bytes()).expect("Failed to write manifest");
        }
        for (name, contents) in &self.files {
            zip.start_file(name.as_str(), options).expect("Failed to start file");
            zip.write_all(contents).expect("Failed to write file");
        }
        zip.finish().expect("Failed to finish archive");
    }

    /// Writes the export as an extracted directory under `dir`.
    pub fn write_dir(&self, dir: &Path) {
        if !self.omit_manifest {
            std::fs::write(dir.join("!!!meta.json"), self.manifest())
                .expect("Failed to write manifest");
        }
        for (name, contents) in &self.files {
            let path = dir.join(name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create directory");
            }
            std::fs::write(path, contents).expect("Failed to write file");
        }
    }
}
