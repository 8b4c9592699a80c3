//! Shared HTML components used across all pages.
//!
//! These are maud functions that return `Markup` fragments for composition
//! into full pages, plus the document shell that wraps prerendered markup
//! together with the embedded payload.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use maud::{Markup, PreEscaped, html};
use vitrina_core::{ListingItem, PAYLOAD_ELEMENT_ID, PageHead, PageKind, RobotsDirective};

/// Inline CSS for all pages.
///
/// Flat layout, spacing and background shifts for hierarchy.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
:root{--bg:#f7f7f5;--fg:#141414;--fg2:#555;--fg3:#8a8a8a;--accent:#d7263d;--accent-hover:#b01e31;--surface:#fff;--border:rgba(20,20,20,.1)}
body{font-family:Inter,-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;color:var(--fg);background:var(--bg);min-height:100vh;display:flex;flex-direction:column;align-items:center}
.topbar{width:100%;background:var(--surface);border-bottom:1px solid var(--border);display:flex;justify-content:center}
.topbar nav{max-width:960px;width:100%;display:flex;gap:1.25rem;align-items:center;padding:.75rem 1rem;font-size:.95rem}
.topbar .brand{font-weight:800;letter-spacing:-.02em;color:var(--fg);margin-right:auto}
main{max-width:960px;width:100%;flex:1;padding:1.5rem 1rem}
a{color:var(--accent);text-decoration:none}
a:hover{text-decoration:underline}
img{max-width:100%;height:auto}

.hero{margin-bottom:1.5rem}
.hero h1{font-size:2rem;line-height:1.2;letter-spacing:-.02em}
.hero .lead{color:var(--fg2);font-size:1.1rem;margin-top:.5rem}
.hero-image{width:100%;max-height:360px;object-fit:cover;border-radius:10px;margin-bottom:1rem}

.facts{display:grid;grid-template-columns:max-content 1fr;gap:.35rem 1rem;margin:1rem 0;font-size:.95rem}
.facts dt{color:var(--fg3)}
.facts dd{color:var(--fg)}

.section{margin:2rem 0}
.section h2{font-size:1.25rem;margin-bottom:.75rem}
.empty-state{color:var(--fg3);font-style:italic}

.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:1rem}
.tile{background:var(--surface);border:1px solid var(--border);border-radius:10px;overflow:hidden;display:flex;flex-direction:column;color:var(--fg)}
.tile:hover{border-color:var(--accent);text-decoration:none}
.tile img{width:100%;aspect-ratio:16/9;object-fit:cover;display:block}
.tile-body{padding:.75rem}
.tile-title{font-weight:600;line-height:1.3}
.tile-sub{color:var(--fg3);font-size:.85rem;margin-top:.25rem}

.scoreboard{display:flex;align-items:center;justify-content:center;gap:1.5rem;background:var(--surface);border:1px solid var(--border);border-radius:10px;padding:1.5rem;margin:1rem 0;font-size:1.25rem;font-weight:700}
.scoreboard .score{font-size:2rem;font-variant-numeric:tabular-nums}
.badges{display:flex;flex-wrap:wrap;gap:.4rem;margin:.75rem 0}
.badge{background:var(--surface);border:1px solid var(--border);border-radius:100px;padding:.15rem .65rem;font-size:.8rem;color:var(--fg2)}

.poster-layout{display:grid;grid-template-columns:220px 1fr;gap:1.5rem}
.poster{width:100%;border-radius:8px}
@media(max-width:640px){.poster-layout{grid-template-columns:1fr}}

.countdown{text-align:center;padding:2rem 1rem}
.countdown-target{font-size:1.5rem;font-weight:700;font-variant-numeric:tabular-nums;margin:1rem 0}

.body-text p{margin:.75rem 0;font-size:1.05rem;line-height:1.75}

.embed-card{display:block;background:var(--surface);border:1px solid var(--border);border-radius:10px;padding:1rem;color:var(--fg)}
.embed-card:hover{border-color:var(--accent);text-decoration:none}
.embed-title{font-weight:700;font-size:1.1rem}
.embed-cta{display:inline-block;margin-top:.5rem;color:var(--accent);font-weight:600}

.not-found{text-align:center;padding:3rem 1rem}
.not-found h1{font-size:1.75rem;margin-bottom:.5rem}
.not-found p{color:var(--fg2);margin-bottom:1rem}

.footer{text-align:center;padding:1.5rem 1rem;font-size:.8rem;color:var(--fg3);width:100%}

@media(prefers-color-scheme:dark){
:root{--bg:#0e0e10;--fg:#ececec;--fg2:#a5a5a5;--fg3:#6f6f6f;--accent:#ff4d63;--accent-hover:#ff7384;--surface:#17171a;--border:rgba(255,255,255,.1)}
}
"#;

/// Inline CSS for error pages.
pub const ERROR_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;display:flex;justify-content:center;align-items:center;min-height:100vh;background:#f7f7f5;color:#141414;padding:1rem}
.error-page{text-align:center;max-width:400px}
.error-page h1{font-size:1.5rem;margin-bottom:.75rem}
.error-page p{color:#666;margin-bottom:1rem;line-height:1.5}
.error-page a{color:#d7263d}
@media(prefers-color-scheme:dark){
body{background:#0e0e10;color:#ececec}
.error-page p{color:#aaa}
.error-page a{color:#ff4d63}
}
"#;

/// Content-Security-Policy header value.
///
/// The payload block is `application/json` and never executes, so no
/// script source is allowed at all. Only HTTPS images.
pub const CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; img-src https: data:; connect-src 'self'; form-action 'none'; frame-ancestors 'none'";

/// CSP for embeddable widgets: same as [`CSP_HEADER`] but frameable anywhere.
pub const EMBED_CSP_HEADER: &str = "default-src 'none'; style-src 'unsafe-inline'; img-src https: data:; connect-src 'self'; form-action 'none'; frame-ancestors *";

/// Everything the document shell needs besides the body markup.
pub struct DocumentParts<'a> {
    pub head: &'a PageHead,
    pub kind: PageKind,
    pub canonical_url: &'a str,
    pub site_name: &'a str,
    pub robots: RobotsDirective,
    /// Payload JSON, already escaped for a script element.
    pub payload_json: &'a str,
}

/// Render the full HTML document around prerendered body markup.
pub fn page_shell(parts: &DocumentParts<'_>, body_markup: &str) -> Markup {
    let head = parts.head;
    let full_title = if head.title.is_empty() {
        parts.site_name.to_string()
    } else {
        format!("{} | {}", head.title, parts.site_name)
    };
    let og_image = head.image.as_deref().filter(|u| is_safe_url(u));
    let twitter_card = if og_image.is_some() {
        "summary_large_image"
    } else {
        "summary"
    };
    let is_embed = parts.kind == PageKind::Embed;

    html! {
        (maud::DOCTYPE)
        html lang="ro" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (full_title) }
                meta name="description" content=(head.description);
                meta name="robots" content=(parts.robots.as_str());
                link rel="canonical" href=(parts.canonical_url);

                // Open Graph
                meta property="og:title" content=(head.title);
                meta property="og:description" content=(head.description);
                meta property="og:url" content=(parts.canonical_url);
                meta property="og:site_name" content=(parts.site_name);
                meta property="og:type" content=(head.og_type);
                meta property="og:locale" content="ro_RO";
                @if let Some(image) = og_image {
                    meta property="og:image" content=(image);
                }

                // Twitter Card
                meta name="twitter:card" content=(twitter_card);
                meta name="twitter:title" content=(head.title);
                meta name="twitter:description" content=(head.description);
                @if let Some(image) = og_image {
                    meta name="twitter:image" content=(image);
                }

                style { (PreEscaped(PAGE_CSS)) }
            }
            body data-kind=(parts.kind.as_str()) {
                @if !is_embed {
                    (topbar(parts.site_name))
                }
                main id="app" { (PreEscaped(body_markup)) }
                @if !is_embed {
                    footer class="footer" { "© " (parts.site_name) }
                }
                script type="application/json" id=(PAYLOAD_ELEMENT_ID) {
                    (PreEscaped(parts.payload_json))
                }
            }
        }
    }
}

fn topbar(site_name: &str) -> Markup {
    html! {
        header class="topbar" {
            nav {
                a class="brand" href="/" { (site_name) }
                a href="/filme" { "Filme" }
                a href="/categorii/evenimente" { "Evenimente" }
                a href="/categorii/sport" { "Sport" }
                a href="/black-friday" { "Black Friday" }
            }
        }
    }
}

/// A titled section with a listing grid, or an empty-state line.
pub fn section(title: &str, items: &[ListingItem], empty_message: &str) -> Markup {
    html! {
        section class="section" {
            h2 { (title) }
            @if items.is_empty() {
                p class="empty-state" { (empty_message) }
            } @else {
                (listing_grid(items))
            }
        }
    }
}

/// Grid of teaser tiles.
pub fn listing_grid(items: &[ListingItem]) -> Markup {
    html! {
        div class="grid" {
            @for item in items {
                (tile(item))
            }
        }
    }
}

fn tile(item: &ListingItem) -> Markup {
    let href = if is_safe_href(&item.href) {
        item.href.as_str()
    } else {
        "#"
    };

    html! {
        a class="tile" href=(href) {
            @if let Some(image) = item.image.as_deref().filter(|u| is_safe_url(u)) {
                img src=(image) alt=(item.title) loading="lazy";
            }
            div class="tile-body" {
                div class="tile-title" { (item.title) }
                @if let Some(subtitle) = &item.subtitle {
                    div class="tile-sub" { (subtitle) }
                }
                @if let Some(starts_at) = item.starts_at {
                    div class="tile-sub" {
                        time datetime=(iso(starts_at)) { (format_datetime(starts_at)) }
                    }
                }
            }
        }
    }
}

/// Definition list of label/value facts, skipping missing values.
pub fn facts(rows: &[(&str, Option<String>)]) -> Markup {
    html! {
        dl class="facts" {
            @for (label, value) in rows {
                @if let Some(value) = value {
                    dt { (label) }
                    dd { (value) }
                }
            }
        }
    }
}

/// Plain text split into paragraphs on blank lines.
pub fn paragraphs(text: &str) -> Markup {
    html! {
        div class="body-text" {
            @for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
                p { (paragraph) }
            }
        }
    }
}

/// Not-found presentation. Every kind has its own wording.
pub fn not_found(kind: PageKind) -> Markup {
    let (title, message) = not_found_text(kind);
    html! {
        div class="not-found" {
            h1 { (title) }
            p { (message) }
            @if kind != PageKind::Embed {
                a href="/" { "Înapoi la prima pagină" }
            }
        }
    }
}

/// Title and message for a kind's not-found page.
pub fn not_found_text(kind: PageKind) -> (&'static str, &'static str) {
    match kind {
        PageKind::Home => (
            "Conținut indisponibil",
            "Nu am putut încărca recomandările. Încearcă din nou în câteva minute.",
        ),
        PageKind::BlackFriday => (
            "Campania nu este activă",
            "Ofertele Black Friday nu sunt disponibile acum.",
        ),
        PageKind::Movies => (
            "Program indisponibil",
            "Nu am putut încărca programul cinematografelor.",
        ),
        PageKind::Event => (
            "Eveniment negăsit",
            "Evenimentul căutat nu există sau a fost retras.",
        ),
        PageKind::Match => (
            "Meci negăsit",
            "Meciul căutat nu există sau nu a fost programat încă.",
        ),
        PageKind::Movie => ("Film negăsit", "Filmul căutat nu există în catalog."),
        PageKind::Category => ("Categorie negăsită", "Categoria căutată nu există."),
        PageKind::Countdown => (
            "Numărătoare inversă negăsită",
            "Numărătoarea inversă căutată nu există.",
        ),
        PageKind::Embed => ("Conținut indisponibil", "Widgetul nu mai este disponibil."),
        PageKind::Generic => ("Pagina nu există", "Adresa accesată nu corespunde niciunei pagini."),
    }
}

const MONTHS_RO: [&str; 12] = [
    "ianuarie",
    "februarie",
    "martie",
    "aprilie",
    "mai",
    "iunie",
    "iulie",
    "august",
    "septembrie",
    "octombrie",
    "noiembrie",
    "decembrie",
];

/// "7 august 2025, 16:00 UTC"
pub fn format_datetime(at: DateTime<Utc>) -> String {
    format!(
        "{} {} {}, {:02}:{:02} UTC",
        at.day(),
        MONTHS_RO[at.month0() as usize],
        at.year(),
        at.hour(),
        at.minute()
    )
}

/// "7 august 2025"
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS_RO[date.month0() as usize],
        date.year()
    )
}

/// RFC 3339 timestamp for `datetime` attributes.
pub fn iso(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Check that a URL is safe to use in an `src` attribute (HTTPS or HTTP only).
pub fn is_safe_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// Check that a link target is an absolute HTTP(S) URL or a site path.
pub fn is_safe_href(href: &str) -> bool {
    is_safe_url(href) || (href.starts_with('/') && !href.starts_with("//"))
}

/// Truncate a string to a maximum length, appending "..." if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut end = max_len;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts<'a>(head: &'a PageHead, kind: PageKind, payload: &'a str) -> DocumentParts<'a> {
        DocumentParts {
            head,
            kind,
            canonical_url: "https://vitrina.ro/filme/dune-2",
            site_name: "Vitrina",
            robots: RobotsDirective::Index,
            payload_json: payload,
        }
    }

    // -- page_shell() tests --

    #[test]
    fn page_shell_embeds_payload_and_robots() {
        let head = PageHead {
            title: "Dune 2".to_string(),
            description: "Film".to_string(),
            image: Some("https://img.vitrina.ro/dune.jpg".to_string()),
            og_type: "video.movie".to_string(),
        };
        let html = page_shell(&parts(&head, PageKind::Movie, r#"{"a":"<"}"#), "<h1>Dune</h1>")
            .into_string();

        assert!(html.contains(r#"<html lang="ro">"#));
        assert!(html.contains("<title>Dune 2 | Vitrina</title>"));
        assert!(html.contains(r#"<meta name="robots" content="index, follow">"#));
        assert!(html.contains(r#"<script type="application/json" id="__VITRINA_DATA__">{"a":"<"}</script>"#));
        assert!(html.contains("<main id=\"app\"><h1>Dune</h1></main>"));
        assert!(html.contains("summary_large_image"));
        assert!(html.contains("topbar"));
    }

    #[test]
    fn page_shell_drops_unsafe_og_image() {
        let head = PageHead {
            title: "x".to_string(),
            image: Some("javascript:alert(1)".to_string()),
            og_type: "website".to_string(),
            ..PageHead::default()
        };
        let html = page_shell(&parts(&head, PageKind::Generic, "{}"), "").into_string();
        assert!(!html.contains("og:image"));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn page_shell_embed_has_no_chrome() {
        let head = PageHead::default();
        let html = page_shell(&parts(&head, PageKind::Embed, "{}"), "").into_string();
        assert!(!html.contains("topbar"));
        assert!(!html.contains("class=\"footer\""));
        assert!(html.contains("<title>Vitrina</title>"));
    }

    // -- listing tests --

    #[test]
    fn section_empty_state() {
        let html = section("Filme noi", &[], "Nimic deocamdată.").into_string();
        assert!(html.contains("empty-state"));
        assert!(!html.contains("class=\"grid\""));
    }

    #[test]
    fn tile_rejects_unsafe_href() {
        let item = ListingItem {
            title: "<b>x</b>".to_string(),
            href: "javascript:alert(1)".to_string(),
            image: None,
            subtitle: None,
            starts_at: None,
        };
        let html = listing_grid(&[item]).into_string();
        assert!(html.contains(r##"href="#""##));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }

    #[test]
    fn facts_skip_missing_values() {
        let html = facts(&[("Loc", Some("Cluj".to_string())), ("Oraș", None)]).into_string();
        assert!(html.contains("Cluj"));
        assert!(!html.contains("Oraș"));
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let html = paragraphs("Unu\n\n  \n\nDoi").into_string();
        assert_eq!(html.matches("<p>").count(), 2);
    }

    #[test]
    fn not_found_for_every_kind() {
        for kind in PageKind::ALL {
            let html = not_found(kind).into_string();
            assert!(html.contains("not-found"), "{kind}");
        }
        assert!(!not_found(PageKind::Embed).into_string().contains("href"));
    }

    // -- formatting tests --

    #[test]
    fn format_datetime_romanian() {
        let at = DateTime::parse_from_rfc3339("2025-08-07T16:05:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_datetime(at), "7 august 2025, 16:05 UTC");
        assert_eq!(iso(at), "2025-08-07T16:05:00Z");
    }

    #[test]
    fn format_date_romanian() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(format_date(date), "1 martie 2026");
    }

    // -- is_safe_url() / is_safe_href() tests --

    #[test]
    fn is_safe_url_schemes() {
        assert!(is_safe_url("https://example.com"));
        assert!(is_safe_url("http://example.com"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("data:text/html,<script>alert(1)</script>"));
        assert!(!is_safe_url("/path/to/resource"));
        assert!(!is_safe_url(""));
    }

    #[test]
    fn is_safe_href_allows_site_paths() {
        assert!(is_safe_href("/filme/dune-2"));
        assert!(is_safe_href("https://vitrina.ro"));
        assert!(!is_safe_href("//evil.example"));
        assert!(!is_safe_href("javascript:alert(1)"));
    }

    // -- truncate() tests --

    #[test]
    fn truncate_shorter_than_max() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_longer_than_max() {
        assert_eq!(truncate("hello world", 5), "hello...");
    }

    #[test]
    fn truncate_unicode_multibyte() {
        // 'ă' is 2 bytes in UTF-8
        assert_eq!(truncate("mată", 4), "mat...");
    }
}
