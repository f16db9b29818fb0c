//! Resource entries and the built-in per-platform lists.

use std::path::PathBuf;

use super::Platform;

/// One entry in the staging list.
///
/// Entries containing a path separator are treated as paths relative to the
/// packaging root; bare names are resolved through the system library search
/// path, the way a dynamic loader would find them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResourceSpec {
    /// A library name resolved through the platform's library search path.
    Named(String),
    /// A path relative to the packaging root.
    Path(PathBuf),
}

impl ResourceSpec {
    /// Classifies a raw entry as a name or a relative path.
    pub fn parse(entry: &str) -> Self {
        if entry.contains('/') || entry.contains('\\') {
            ResourceSpec::Path(PathBuf::from(entry))
        } else {
            ResourceSpec::Named(entry.to_string())
        }
    }

    /// Base names this entry may have been staged under.
    ///
    /// Used when removing staged copies without a staging record, e.g. after
    /// an interrupted run. Names without an extension expand to the platform's
    /// library naming variants.
    pub fn dest_candidates(&self, platform: Platform) -> Vec<String> {
        match self {
            ResourceSpec::Path(path) => path
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_string)
                .into_iter()
                .collect(),
            ResourceSpec::Named(name) if name.contains('.') => vec![name.clone()],
            ResourceSpec::Named(name) => match platform {
                Platform::Windows => vec![format!("{name}.dll")],
                Platform::MacOs => vec![format!("lib{name}.dylib"), format!("{name}.dylib")],
                Platform::Linux => vec![format!("lib{name}.so"), format!("{name}.so")],
            },
        }
    }
}

/// Shared libraries a Windows bundle must carry next to the executable.
///
/// The media stack (FFmpeg and friends) is linked dynamically out of an
/// avbuild/MSYS2 toolchain, so every transitive DLL has to travel with the
/// installer.
const WINDOWS_LIBRARIES: &[&str] = &[
    // FFmpeg
    "avcodec-60.dll",
    "libbrotlidec.dll",
    "libffi-8.dll",
    "libgmp-10.dll",
    "libintl-8.dll",
    "libopenjp2-7.dll",
    "libpng16-16.dll",
    "libstdc++-6.dll",
    "libvidstab.dll",
    "libxml2-2.dll",
    "avdevice-60.dll",
    "libbrotlienc.dll",
    "libfontconfig-1.dll",
    "libgnutls-30.dll",
    "liblcms2-2.dll",
    "libopus-0.dll",
    "librsvg-2-2.dll",
    "libSvtAv1Enc.dll",
    "libvorbis-0.dll",
    "libzimg-2.dll",
    "avfilter-9.dll",
    "libbz2-1.dll",
    "libfreetype-6.dll",
    "libgobject-2.0-0.dll",
    "liblzma-5.dll",
    "libp11-kit-0.dll",
    "librtmp-1.dll",
    "libtasn1-6.dll",
    "libvorbisenc-2.dll",
    "libzstd.dll",
    "avformat-60.dll",
    "libcaca-0.dll",
    "libfribidi-0.dll",
    "libgomp-1.dll",
    "libmodplug-1.dll",
    "libpango-1.0-0.dll",
    "libshaderc_shared.dll",
    "libthai-0.dll",
    "libvpl.dll",
    "postproc-57.dll",
    "avutil-58.dll",
    "libcairo-2.dll",
    "libgcc_s_seh-1.dll",
    "libgraphite2.dll",
    "libmp3lame-0.dll",
    "libpangocairo-1.0-0.dll",
    "libsharpyuv-0.dll",
    "libtheoradec-1.dll",
    "libvpx-1.dll",
    "rav1e.dll",
    "dovi.dll",
    "libcairo-gobject-2.dll",
    "libgdk_pixbuf-2.0-0.dll",
    "libgsm.dll",
    "libnettle-8.dll",
    "libpangoft2-1.0-0.dll",
    "libsoxr.dll",
    "libtheoraenc-1.dll",
    "libwebp-7.dll",
    "SDL2.dll",
    "libaom.dll",
    "libcrypto-3-x64.dll",
    "libgio-2.0-0.dll",
    "libharfbuzz-0.dll",
    "libogg-0.dll",
    "libpangowin32-1.0-0.dll",
    "libspeex-1.dll",
    "libunibreak-5.dll",
    "libwebpmux-3.dll",
    "swresample-4.dll",
    "libass-9.dll",
    "libdatrie-1.dll",
    "libglib-2.0-0.dll",
    "libhogweed-6.dll",
    "libopenal-1.dll",
    "libpcre2-8-0.dll",
    "libspirv-cross-c-shared.dll",
    "libunistring-5.dll",
    "libwinpthread-1.dll",
    "swscale-7.dll",
    "libbluray-2.dll",
    "libdav1d-7.dll",
    "libgme.dll",
    "libiconv-2.dll",
    "libopencore-amrnb-0.dll",
    "libpixman-1-0.dll",
    "libsrt.dll",
    "libva.dll",
    "libx264-164.dll",
    "xvidcore.dll",
    "libbrotlicommon.dll",
    "libexpat-1.dll",
    "libgmodule-2.0-0.dll",
    "libidn2-0.dll",
    "libopencore-amrwb-0.dll",
    "libplacebo-338.dll",
    "libssh.dll",
    "libva_win32.dll",
    "libx265.dll",
    "zlib1.dll",
    // OpenBLAS
    "libopenblas.dll",
    "libgfortran-5.dll",
    "libquadmath-0.dll",
    "vulkan-1.dll",
];

/// Loader shim produced by the webview build, staged out of the release tree.
const WEBVIEW2_LOADER: &str = "../../target/release/WebView2Loader.dll";

/// Returns the resources staged by default for a platform.
///
/// Windows carries the full media and BLAS runtime plus the WebView2 loader;
/// macOS and Linux link their system frameworks and stage nothing.
pub fn default_resources(platform: Platform) -> Vec<ResourceSpec> {
    match platform {
        Platform::Windows => WINDOWS_LIBRARIES
            .iter()
            .map(|entry| ResourceSpec::parse(entry))
            .chain(std::iter::once(ResourceSpec::parse(WEBVIEW2_LOADER)))
            .collect(),
        Platform::MacOs | Platform::Linux => Vec::new(),
    }
}
