//! In-memory `EditableSurface` for tests.
//!
//! Content is a plain markup string. Overlay chrome is tracked on the side
//! (`containers`, `rendered`), never written into the markup, so
//! `serialize` returns exactly what a chrome-stripping platform would.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::image::{IMAGE_ID_ATTR, ImageId};
use crate::overlay::{ImageView, Size};
use crate::platform::{EditableSurface, UserPrompt};

#[derive(Debug)]
pub struct MockSurface {
    pub mounted: bool,
    pub html: String,
    pub native_insert_works: bool,
    pub range_insert_works: bool,
    pub insert_attempts: usize,
    pub replace_count: usize,
    pub focus_count: usize,
    /// Native commands in the order they were applied, with their value.
    pub commands: Vec<(String, Option<String>)>,
    /// Number of containers created per image.
    pub containers: HashMap<ImageId, usize>,
    /// Last overlay view rendered per image.
    pub rendered: HashMap<ImageId, ImageView>,
    /// Rendered sizes reported back; defaults to 200x150.
    pub sizes: HashMap<ImageId, Size>,
}

impl MockSurface {
    pub fn with_content(html: &str) -> Self {
        Self {
            mounted: true,
            html: html.to_string(),
            native_insert_works: true,
            range_insert_works: true,
            insert_attempts: 0,
            replace_count: 0,
            focus_count: 0,
            commands: Vec::new(),
            containers: HashMap::new(),
            rendered: HashMap::new(),
            sizes: HashMap::new(),
        }
    }

    pub fn unmounted() -> Self {
        Self {
            mounted: false,
            ..Self::with_content("")
        }
    }

    pub fn image_count(&self) -> usize {
        self.html.matches("<img").count()
    }

    /// Byte ranges of every `<img ...>` tag.
    fn img_tags(&self) -> Vec<(usize, usize)> {
        let mut tags = Vec::new();
        let mut from = 0;
        while let Some(start) = self.html[from..].find("<img").map(|i| i + from) {
            let Some(end) = self.html[start..].find('>').map(|i| i + start + 1) else {
                break;
            };
            tags.push((start, end));
            from = end;
        }
        tags
    }

    fn tag_id(tag: &str) -> Option<ImageId> {
        let needle = format!(r#"{IMAGE_ID_ATTR}=""#);
        let start = tag.find(&needle)? + needle.len();
        let len = tag[start..].find('"')?;
        Some(ImageId::new(&tag[start..start + len]))
    }
}

/// Drop every ` data-image-id="..."` attribute, as the browser surface does.
fn strip_image_ids(html: &str) -> String {
    let needle = format!(r#" {IMAGE_ID_ATTR}=""#);
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find(&needle) {
        out.push_str(&rest[..start]);
        let value = &rest[start + needle.len()..];
        rest = value.find('"').map_or("", |end| &value[end + 1..]);
    }
    out.push_str(rest);
    out
}

impl EditableSurface for MockSurface {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn focus(&mut self) {
        self.focus_count += 1;
    }

    fn exec_command(&mut self, name: &str, value: Option<&str>) -> bool {
        if !self.mounted {
            return false;
        }
        self.commands
            .push((name.to_string(), value.map(str::to_string)));
        self.html.push_str(&format!("<!--{name}-->"));
        true
    }

    fn serialize(&self) -> String {
        strip_image_ids(&self.html)
    }

    fn replace_contents(&mut self, markup: &str) {
        self.replace_count += 1;
        self.html = markup.to_string();
        self.containers.clear();
        self.rendered.clear();
    }

    fn insert_html_at_selection(&mut self, html: &str) -> bool {
        self.insert_attempts += 1;
        if self.native_insert_works {
            self.html.push_str(html);
        }
        self.native_insert_works
    }

    fn insert_at_range(&mut self, html: &str) -> bool {
        self.insert_attempts += 1;
        if self.range_insert_works {
            self.html.push_str(html);
        }
        self.range_insert_works
    }

    fn append(&mut self, html: &str) -> bool {
        self.insert_attempts += 1;
        self.html.push_str(html);
        true
    }

    fn collect_images(&mut self, mint: &mut dyn FnMut() -> ImageId) -> Vec<ImageId> {
        let mut ids = Vec::new();
        // Walk backwards so inserting attributes doesn't shift later ranges.
        for (start, end) in self.img_tags().into_iter().rev() {
            match Self::tag_id(&self.html[start..end]) {
                Some(id) => ids.push(id),
                None => {
                    let id = mint();
                    self.html
                        .insert_str(start + 4, &format!(r#" {IMAGE_ID_ATTR}="{id}""#));
                    ids.push(id);
                }
            }
        }
        ids.reverse();
        ids
    }

    fn wrap_image(&mut self, id: &ImageId) -> bool {
        let count = self.containers.entry(id.clone()).or_insert(0);
        if *count > 0 {
            return false;
        }
        *count += 1;
        true
    }

    fn render_image(&mut self, id: &ImageId, view: &ImageView) {
        self.rendered.insert(id.clone(), *view);
    }

    fn image_size(&self, id: &ImageId) -> Option<Size> {
        Some(
            self.sizes
                .get(id)
                .copied()
                .unwrap_or(Size::new(200.0, 150.0)),
        )
    }

    fn remove_image(&mut self, id: &ImageId) -> bool {
        let found = self
            .img_tags()
            .into_iter()
            .find(|&(s, e)| Self::tag_id(&self.html[s..e]).as_ref() == Some(id));
        match found {
            Some((start, end)) => {
                self.html.replace_range(start..end, "");
                self.containers.remove(id);
                self.rendered.remove(id);
                true
            }
            None => false,
        }
    }
}

/// Scripted answers for prompts and confirmations.
#[derive(Debug, Default)]
pub struct MockPrompt {
    pub answers: RefCell<VecDeque<Option<String>>>,
    pub confirm_answer: bool,
    pub asked: RefCell<Vec<String>>,
}

impl MockPrompt {
    pub fn answering(answer: Option<&str>) -> Self {
        Self {
            answers: RefCell::new(VecDeque::from([answer.map(str::to_string)])),
            ..Self::default()
        }
    }

    pub fn confirming(yes: bool) -> Self {
        Self {
            confirm_answer: yes,
            ..Self::default()
        }
    }
}

impl UserPrompt for MockPrompt {
    fn prompt(&self, message: &str, _default: &str) -> Option<String> {
        self.asked.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().flatten()
    }

    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.confirm_answer
    }
}
