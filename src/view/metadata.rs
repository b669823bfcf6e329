/// Image shown by link unfurlers
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub url: &'static str,
    pub width: u32,
    pub height: u32,
    pub alt: &'static str,
}

/// Static `<head>` metadata for search engines and social previews
#[derive(Debug, Clone)]
pub struct PageMetadata {
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub author: &'static str,
    pub site_name: &'static str,
    pub site_url: &'static str,
    pub locale: &'static str,
    /// Title used by Open Graph and Twitter cards
    pub share_title: &'static str,
    pub image: PreviewImage,
    pub twitter_card: &'static str,
    pub robots: &'static str,
}

impl PageMetadata {
    pub fn landing() -> Self {
        const DESCRIPTION: &str = "Join the waitlist for Louis, the AI legal scribe that replaces handwritten notes with precise capture of trial prep, depositions, and client meetings.";

        Self {
            title: "Louis - AI Legal Scribe for Lawyers & Law Firms",
            description: DESCRIPTION,
            keywords: &[
                "AI legal scribe",
                "lawyer technology",
                "legal AI",
                "trial prep",
                "deposition notes",
                "legal automation",
            ],
            author: "Louis",
            site_name: "Louis",
            site_url: "https://www.getlouis.ai",
            locale: "en_US",
            share_title: "Louis Waitlist - AI Legal Scribe for Lawyers & Law Firms",
            image: PreviewImage {
                url: "/og-image.png",
                width: 1200,
                height: 630,
                alt: "Louis - AI Legal Scribe",
            },
            twitter_card: "summary_large_image",
            robots: "index, follow, max-video-preview:-1, max-image-preview:large, max-snippet:-1",
        }
    }

    pub fn keywords(&self) -> String {
        self.keywords.join(", ")
    }

    /// Whether every crawler-facing field carries a value
    pub fn is_complete(&self) -> bool {
        let text = [
            self.title,
            self.description,
            self.author,
            self.site_name,
            self.site_url,
            self.locale,
            self.share_title,
            self.image.url,
            self.image.alt,
            self.twitter_card,
            self.robots,
        ];
        text.iter().all(|s| !s.trim().is_empty())
            && !self.keywords.is_empty()
            && self.image.width > 0
            && self.image.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_metadata_is_complete() {
        assert!(PageMetadata::landing().is_complete());
    }

    #[test]
    fn blank_field_is_incomplete() {
        let metadata = PageMetadata {
            description: "  ",
            ..PageMetadata::landing()
        };
        assert!(!metadata.is_complete());
    }

    #[test]
    fn keywords_are_comma_separated() {
        let keywords = PageMetadata::landing().keywords();
        assert!(keywords.starts_with("AI legal scribe, lawyer technology"));
    }
}
