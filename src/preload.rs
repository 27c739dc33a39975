/// Image preloading
///
/// Before an image is promoted into the visible grid its bytes are
/// fetched and decoded off-screen, so promotion never janks the layout.
/// Every preload settles — success or failure — and a failure only means
/// that one cell renders the broken-image placeholder.

use futures_util::future::join_all;
use iced::widget::image::Handle;
use image::imageops::FilterType;
use tokio::task;

/// Longest edge kept after decode; larger originals are downscaled so an
/// album of full-resolution photos does not exhaust memory
const MAX_DECODE_EDGE: u32 = 2048;

/// How one preload settled
#[derive(Debug, Clone)]
pub enum PreloadOutcome {
    /// Decoded and ready to hand to the image widget
    Loaded(Handle),
    /// Fetch or decode failed; the cell shows a broken-image placeholder
    Failed,
}

/// Result of preloading one batch of images
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Loader generation the batch was started under
    pub generation: u64,
    /// One settled outcome per requested URL, in request order
    pub outcomes: Vec<(String, PreloadOutcome)>,
}

/// Fetch and decode one image, settling to an outcome
///
/// Never returns an error: failures are reported as `Failed` so a bad
/// image cannot block the batch it belongs to.
pub async fn preload(url: String) -> PreloadOutcome {
    match fetch_and_decode(url.clone()).await {
        Ok(handle) => PreloadOutcome::Loaded(handle),
        Err(e) => {
            eprintln!("⚠️  Preload failed for {}: {}", url, e);
            PreloadOutcome::Failed
        }
    }
}

/// Preload a batch of images and wait until every one has settled
///
/// The join completes only when each URL has an outcome, regardless of
/// how many failed; outcomes come back in request order.
pub async fn preload_batch(urls: Vec<String>, generation: u64) -> BatchResult {
    let outcomes = join_all(urls.iter().cloned().map(preload)).await;

    BatchResult {
        generation,
        outcomes: urls.into_iter().zip(outcomes).collect(),
    }
}

async fn fetch_and_decode(url: String) -> Result<Handle, String> {
    let bytes = fetch_bytes(&url).await?;

    // Decoding is CPU-bound, keep it off the async runtime
    task::spawn_blocking(move || decode(&bytes))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Read the image bytes from wherever the URL points
///
/// `http(s)` URLs go over the network; everything else is treated as a
/// local path.
async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        let response = reqwest::get(url)
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| format!("Request failed: {}", e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read response body: {}", e))?;

        Ok(bytes.to_vec())
    } else {
        tokio::fs::read(url)
            .await
            .map_err(|e| format!("Failed to read file: {}", e))
    }
}

fn decode(bytes: &[u8]) -> Result<Handle, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("Failed to decode: {}", e))?;

    let img = if img.width().max(img.height()) > MAX_DECODE_EDGE {
        img.resize(MAX_DECODE_EDGE, MAX_DECODE_EDGE, FilterType::Triangle)
    } else {
        img
    };

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Handle::from_rgba(width, height, rgba.into_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_png(path: &Path) {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([120, 40, 200, 255]));
        img.save(path).expect("write test png");
    }

    #[tokio::test]
    async fn test_preload_local_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("pic.png");
        write_png(&path);

        let outcome = preload(path.to_string_lossy().to_string()).await;
        assert!(matches!(outcome, PreloadOutcome::Loaded(_)));
    }

    #[tokio::test]
    async fn test_preload_missing_file_settles_failed() {
        let outcome = preload("/nonexistent/pic.png".to_string()).await;
        assert!(matches!(outcome, PreloadOutcome::Failed));
    }

    #[tokio::test]
    async fn test_preload_undecodable_bytes_settle_failed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"this is not a png").expect("write garbage");

        let outcome = preload(path.to_string_lossy().to_string()).await;
        assert!(matches!(outcome, PreloadOutcome::Failed));
    }

    #[tokio::test]
    async fn test_batch_settles_every_item_in_order() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let good = dir.path().join("good.png");
        write_png(&good);
        let good = good.to_string_lossy().to_string();
        let bad = dir.path().join("missing.png").to_string_lossy().to_string();

        let result =
            preload_batch(vec![good.clone(), bad.clone(), good.clone()], 7).await;

        assert_eq!(result.generation, 7);
        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(result.outcomes[0].0, good);
        assert!(matches!(result.outcomes[0].1, PreloadOutcome::Loaded(_)));
        assert_eq!(result.outcomes[1].0, bad);
        assert!(matches!(result.outcomes[1].1, PreloadOutcome::Failed));
        assert!(matches!(result.outcomes[2].1, PreloadOutcome::Loaded(_)));
    }
}
