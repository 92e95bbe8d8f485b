//! Versioned reference tables for screenshot and synthetic-origin detection.
//!
//! Kept apart from the detection logic so the lists can be revised (and
//! tested) on their own. Bump [`SIGNATURES_VERSION`] whenever an entry is
//! added or removed; it is logged with every provenance verdict.

pub const SIGNATURES_VERSION: &str = "2024.2";

/// Substrings of the EXIF `Software` tag that indicate a screen capture,
/// an image editor, or a generative-image tool. Matched case-insensitively;
/// entries must be lowercase.
pub const NON_CAMERA_SOFTWARE: &[&str] = &[
    // screen capture
    "screenshot",
    "screen capture",
    "screencapture",
    "snipping tool",
    "snip & sketch",
    "snagit",
    "greenshot",
    "lightshot",
    "sharex",
    "flameshot",
    "spectacle",
    "skitch",
    "monosnap",
    "cleanshot",
    // editors
    "photoshop",
    "gimp",
    "paint",
    "pixelmator",
    "affinity photo",
    "photopea",
    "canva",
    "picsart",
    "snapseed",
    "facetune",
    "fotor",
    // generative
    "dall-e",
    "dall·e",
    "midjourney",
    "stable diffusion",
    "stablediffusion",
    "firefly",
    "novelai",
    "leonardo.ai",
    "ideogram",
    "comfyui",
    "automatic1111",
    "invokeai",
];

/// Pixel dimensions of common displays (monitors, laptops, phones, tablets),
/// stored landscape-first. A capture whose declared size matches one of these
/// exactly, in either orientation, looks like a screen grab.
pub const COMMON_SCREEN_RESOLUTIONS: &[(u32, u32)] = &[
    // desktop and laptop
    (1280, 720),
    (1280, 800),
    (1366, 768),
    (1440, 900),
    (1536, 864),
    (1600, 900),
    (1680, 1050),
    (1920, 1080),
    (1920, 1200),
    (2560, 1440),
    (2560, 1600),
    (2880, 1800),
    (3024, 1964),
    (3456, 2234),
    (3840, 2160),
    (5120, 2880),
    // phones
    (1334, 750),
    (1792, 828),
    (2208, 1242),
    (2436, 1125),
    (2532, 1170),
    (2556, 1179),
    (2688, 1242),
    (2778, 1284),
    (2796, 1290),
    (2280, 1080),
    (2340, 1080),
    (2400, 1080),
    (3088, 1440),
    (3200, 1440),
    // tablets
    (2048, 1536),
    (2160, 1620),
    (2360, 1640),
    (2388, 1668),
    (2732, 2048),
];

/// First table entry contained in `software`, if any.
pub fn match_software(software: &str) -> Option<&'static str> {
    let lowered = software.to_lowercase();
    NON_CAMERA_SOFTWARE
        .iter()
        .copied()
        .find(|entry| lowered.contains(entry))
}

/// True when `(width, height)` is a common screen size in either orientation.
pub fn is_screen_resolution(width: u32, height: u32) -> bool {
    COMMON_SCREEN_RESOLUTIONS
        .iter()
        .any(|&(w, h)| (w, h) == (width, height) || (h, w) == (width, height))
}
