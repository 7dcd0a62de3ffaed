//! Font discovery
//!
//! Resolves font specifiers to file data. A specifier is tried as a file
//! in the assets directory, then as a filesystem path, then as a family
//! name via fontconfig. System CJK fonts are searched from hardcoded
//! paths first and fontconfig second.

use fontconfig::Fontconfig;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Resolve a font specifier: if it names a file under `assets_dir` or a
/// valid path, read it directly. Otherwise treat it as a font family
/// name and search via fontconfig.
pub fn resolve_font(specifier: &str, assets_dir: &Path) -> Option<Vec<u8>> {
    let bundled = assets_dir.join(specifier);
    if bundled.is_file() {
        if let Ok(data) = std::fs::read(&bundled) {
            info!("Font loaded: {}", bundled.display());
            return Some(data);
        }
    }

    let path = Path::new(specifier);
    if path.is_file() {
        if let Ok(data) = std::fs::read(path) {
            info!("Font loaded: {}", path.display());
            return Some(data);
        }
    }

    // Try as font family name via fontconfig
    if let Some(found) = find_font_by_name(specifier) {
        if let Ok(data) = std::fs::read(&found) {
            info!(
                "Font resolved by name: \"{}\" -> {}",
                specifier,
                found.display()
            );
            return Some(data);
        }
    }

    debug!("Font specifier did not resolve: \"{}\"", specifier);
    None
}

/// Search by font name using fontconfig.
/// Verifies that the returned font actually matches the requested family
/// name (fontconfig always returns the "closest" match, even if
/// completely unrelated).
pub fn find_font_by_name(family: &str) -> Option<PathBuf> {
    let fc = Fontconfig::new()?;
    if let Some(font) = fc.find(family, None) {
        let req = family.to_ascii_lowercase();
        let got = font.name.to_ascii_lowercase();
        if got.contains(&req) || req.contains(&got) {
            return Some(font.path);
        }
        warn!(
            "fontconfig: rejected false match for \"{}\": got \"{}\"",
            family, font.name
        );
    }
    None
}

/// Search and load a system font with CJK coverage for the last-resort
/// tier.
///
/// Search order:
/// 1. ZIPAI_SYSTEM_FONT environment variable
/// 2. Known paths (hardcoded)
/// 3. fontconfig (fallback)
pub fn load_system_cjk_font() -> Option<Vec<u8>> {
    // Custom font can be specified via ZIPAI_SYSTEM_FONT environment variable
    if let Ok(path) = std::env::var("ZIPAI_SYSTEM_FONT") {
        match std::fs::read(&path) {
            Ok(data) => {
                info!("System font loaded: {} (ZIPAI_SYSTEM_FONT)", path);
                return Some(data);
            }
            Err(e) => warn!("Failed to load ZIPAI_SYSTEM_FONT: {} ({})", path, e),
        }
    }

    let candidates = [
        // Noto Sans CJK (Debian/Ubuntu fonts-noto-cjk package)
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJKsc-Regular.otf",
        "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
        // Source Han Sans
        "/usr/share/fonts/adobe-source-han-sans/SourceHanSansCN-Regular.otf",
        // WenQuanYi
        "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
        "/usr/share/fonts/wenquanyi/wqy-zenhei.ttc",
        // AR PL UKai / UMing
        "/usr/share/fonts/truetype/arphic/ukai.ttc",
        "/usr/share/fonts/truetype/arphic/uming.ttc",
        // macOS (development/testing)
        "/System/Library/Fonts/PingFang.ttc",
        "/System/Library/Fonts/STHeiti Light.ttc",
        "/Library/Fonts/Arial Unicode.ttf",
    ];

    for path in &candidates {
        if let Ok(data) = std::fs::read(path) {
            info!("System CJK font loaded: {}", path);
            return Some(data);
        }
    }

    // Fallback to fontconfig
    debug!("Not found in hardcoded paths, trying fontconfig");
    let names = [
        "Noto Sans CJK SC",
        "Noto Sans CJK",
        "Source Han Sans",
        "WenQuanYi Zen Hei",
        "AR PL UKai CN",
    ];
    for name in names {
        if let Some(path) = find_font_by_name(name) {
            if let Ok(data) = std::fs::read(&path) {
                info!("System CJK font (fontconfig): {} ({})", name, path.display());
                return Some(data);
            }
        }
    }

    warn!("No system CJK font found; last-resort tier will draw placeholders");
    None
}
