//! Ready-made contents for common social profiles and business payloads.

use crate::content::ContentSpec;

/// Which shelf a template sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Social,
    Business,
}

/// A placeholder payload plus the caption that usually goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub kind: TemplateKind,
    pub content: &'static str,
    pub label: &'static str,
}

impl Template {
    /// The template as renderable content, caption included.
    pub fn to_content(&self) -> ContentSpec {
        ContentSpec::new(self.content).with_label(self.label)
    }
}

const fn social(name: &'static str, content: &'static str, label: &'static str) -> Template {
    Template { name, kind: TemplateKind::Social, content, label }
}

const fn business(name: &'static str, content: &'static str, label: &'static str) -> Template {
    Template { name, kind: TemplateKind::Business, content, label }
}

pub const TEMPLATES: [Template; 9] = [
    social("Instagram Profile", "https://instagram.com/yourusername", "Follow me on Instagram!"),
    social("Twitter Profile", "https://twitter.com/yourusername", "Connect on Twitter"),
    social("Facebook Page", "https://facebook.com/yourpage", "Like our Facebook page"),
    social("LinkedIn Profile", "https://linkedin.com/in/yourname", "Connect professionally"),
    social("YouTube Channel", "https://youtube.com/@yourchannel", "Subscribe to our channel"),
    social("Email Contact", "mailto:your.email@example.com", "Send us an email"),
    business("WiFi Access", "WIFI:T:WPA;S:NetworkName;P:Password;H:;;", "Connect to WiFi"),
    business(
        "vCard Contact",
        "BEGIN:VCARD\nVERSION:3.0\nFN:John Doe\nORG:Company\nTEL:+1234567890\nEMAIL:john@example.com\nEND:VCARD",
        "Add to contacts",
    ),
    business(
        "Event",
        "BEGIN:VEVENT\nSUMMARY:Event Name\nDTSTART:20241225T180000Z\nDTEND:20241225T200000Z\nLOCATION:Event Location\nEND:VEVENT",
        "Add to calendar",
    ),
];

/// Templates of one kind, in display order.
pub fn templates(kind: TemplateKind) -> impl Iterator<Item = &'static Template> {
    TEMPLATES.iter().filter(move |t| t.kind == kind)
}

/// Looks a template up by name, ignoring case.
pub fn template(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
