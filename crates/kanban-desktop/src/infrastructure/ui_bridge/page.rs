//! The HTML page loaded into the webview.
//!
//! Everything is inlined so the page needs no file or network access except
//! the web font:
//!
//! ```text
//! <head>  font link, base style, inlined stylesheet
//! <body>  mount <div>, compiled program, bootstrap script
//! ```

use std::path::PathBuf;

use thiserror::Error;

use kanban_bridge::{render_bootstrap, BridgeConfig, BridgeError};

use crate::infrastructure::storage::config::AssetsConfig;

const FONT_LINK: &str =
    r#"<link href="https://fonts.googleapis.com/css?family=PT+Sans" rel="stylesheet">"#;
const BASE_STYLE: &str = "body { background: #1d1f21; }";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read page asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Contents of the files that are inlined into the page.
#[derive(Debug, Clone, Default)]
pub struct PageAssets {
    pub program_script: String,
    pub stylesheet: Option<String>,
}

impl PageAssets {
    /// Reads the compiled program and the optional stylesheet.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Asset`] if a configured file cannot be read.
    pub fn load(config: &AssetsConfig) -> Result<Self, PageError> {
        let program_script = read(config.program_script_path())?;
        let stylesheet = config.stylesheet_path().map(read).transpose()?;
        Ok(Self {
            program_script,
            stylesheet,
        })
    }
}

fn read(path: PathBuf) -> Result<String, PageError> {
    std::fs::read_to_string(&path).map_err(|source| PageError::Asset { path, source })
}

/// Renders the page for `bridge`.
///
/// # Errors
///
/// Returns [`PageError::Bridge`] if the bridge names fail validation.
pub fn render_page(
    title: &str,
    assets: &PageAssets,
    bridge: &BridgeConfig,
) -> Result<String, PageError> {
    let bootstrap = render_bootstrap(bridge)?;
    let stylesheet = assets
        .stylesheet
        .as_deref()
        .map(inline_style)
        .unwrap_or_default();

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="utf-8">
        <title>{title}</title>
        {font}
        <style>{base}</style>
        {stylesheet}
    </head>
    <body>
        <div id="{mount_id}"></div>
        {program}{bootstrap}
    </body>
</html>
"#,
        title = escape_html(title),
        font = FONT_LINK,
        base = BASE_STYLE,
        stylesheet = stylesheet,
        mount_id = bridge.mount_id,
        program = inline_script(&assets.program_script),
        bootstrap = inline_script(&bootstrap),
    ))
}

fn inline_style(css: &str) -> String {
    format!(
        r#"<style type="text/css">{}</style>"#,
        escape_end_tag(css, "style")
    )
}

fn inline_script(js: &str) -> String {
    format!(
        r#"<script type="text/javascript">{}</script>"#,
        escape_end_tag(js, "script")
    )
}

/// Turns every `</tag` into `<\/tag`, ignoring ASCII case the way HTML
/// matches end tags.
fn escape_end_tag(text: &str, tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = rest.find("</") {
        let (before, after) = rest.split_at(i);
        out.push_str(before);
        let name = &after.as_bytes()[2..];
        let closes =
            name.len() >= tag.len() && name[..tag.len()].eq_ignore_ascii_case(tag.as_bytes());
        out.push_str(if closes { "<\\/" } else { "</" });
        rest = &after[2..];
    }
    out.push_str(rest);
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> PageAssets {
        PageAssets {
            program_script: "var Elm = {};".to_string(),
            stylesheet: Some(".card { color: red; }".to_string()),
        }
    }

    #[test]
    fn test_page_contains_mount_point_before_scripts() {
        // Arrange / Act
        let page = render_page("Board", &assets(), &BridgeConfig::default()).unwrap();

        // Assert
        let mount = page.find(r#"<div id="app"></div>"#).expect("mount point");
        let program = page.find("var Elm = {};").expect("program");
        let bootstrap = page.find("Elm.Main.init(").expect("bootstrap");
        assert!(mount < program && program < bootstrap);
    }

    #[test]
    fn test_page_inlines_styles_and_font() {
        let page = render_page("Board", &assets(), &BridgeConfig::default()).unwrap();
        assert!(page.contains(FONT_LINK));
        assert!(page.contains("body { background: #1d1f21; }"));
        assert!(page.contains(r#"<style type="text/css">.card { color: red; }</style>"#));
    }

    #[test]
    fn test_page_without_stylesheet_omits_it() {
        let assets = PageAssets {
            stylesheet: None,
            ..assets()
        };
        let page = render_page("Board", &assets, &BridgeConfig::default()).unwrap();
        assert!(!page.contains(r#"<style type="text/css">"#));
    }

    #[test]
    fn test_title_is_escaped() {
        let page = render_page("R&D <board>", &assets(), &BridgeConfig::default()).unwrap();
        assert!(page.contains("<title>R&amp;D &lt;board&gt;</title>"));
    }

    #[test]
    fn test_closing_script_tag_in_program_is_neutralised() {
        let assets = PageAssets {
            program_script: r#"var s = "</script>";"#.to_string(),
            stylesheet: None,
        };
        let page = render_page("Board", &assets, &BridgeConfig::default()).unwrap();
        assert!(page.contains(r#"var s = "<\/script>";"#));
    }

    #[test]
    fn test_closing_tags_are_neutralised_in_any_case() {
        // Arrange
        let assets = PageAssets {
            program_script: r#"a = "</SCRIPT>"; b = "</Script >";"#.to_string(),
            stylesheet: Some("/* </STYLE> */".to_string()),
        };

        // Act
        let page = render_page("Board", &assets, &BridgeConfig::default()).unwrap();

        // Assert
        assert!(page.contains(r#"a = "<\/SCRIPT>"; b = "<\/Script >";"#));
        assert!(page.contains("/* <\\/STYLE> */"));
    }

    #[test]
    fn test_escape_end_tag_only_touches_the_named_tag() {
        assert_eq!(escape_end_tag("<b>x</b></scripted", "script"), "<b>x</b><\\/scripted");
        assert_eq!(escape_end_tag("</div></st", "style"), "</div></st");
    }

    #[test]
    fn test_invalid_bridge_names_fail_rendering() {
        let bridge = BridgeConfig {
            mount_id: "a b".to_string(),
            ..BridgeConfig::default()
        };
        assert!(matches!(
            render_page("Board", &assets(), &bridge),
            Err(PageError::Bridge(_))
        ));
    }

    #[test]
    fn test_missing_program_script_is_reported() {
        let config = AssetsConfig {
            dir: std::env::temp_dir().join(format!("kanban-assets-{}", uuid::Uuid::new_v4())),
            ..AssetsConfig::default()
        };
        assert!(matches!(
            PageAssets::load(&config),
            Err(PageError::Asset { .. })
        ));
    }
}
