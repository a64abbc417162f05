//! The single-page UI: image upload or camera capture in, analysis text out.

use axum::{extract::State, response::Html};

use hairscope_core::{DEFAULT_DESCRIPTION, DEFAULT_TITLE};

use crate::server::GatewayState;

/// Heading text shown on the page.
#[derive(Debug, Clone)]
pub struct UiPage {
    pub title: String,
    pub description: String,
}

impl Default for UiPage {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl UiPage {
    pub fn render(&self) -> String {
        PAGE_TEMPLATE
            .replace("{{title}}", &escape_html(&self.title))
            .replace("{{description}}", &escape_html(&self.description))
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Handler for `GET /`.
pub async fn index(State(state): State<GatewayState>) -> Html<String> {
    Html(state.page.render())
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{title}}</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 980px; margin: 2rem auto; padding: 0 1rem; color: #222; }
  .panes { display: flex; gap: 1.5rem; flex-wrap: wrap; }
  .pane { flex: 1 1 420px; }
  .drop { border: 2px dashed #999; border-radius: 8px; min-height: 260px; display: flex; align-items: center; justify-content: center; overflow: hidden; }
  .drop img, .drop video { max-width: 100%; max-height: 360px; }
  label { display: block; font-weight: 600; margin-bottom: .4rem; }
  textarea { width: 100%; box-sizing: border-box; font-family: ui-monospace, monospace; }
  .row { display: flex; gap: .5rem; margin-top: .6rem; flex-wrap: wrap; }
  button { padding: .5rem 1rem; cursor: pointer; }
  button:disabled { cursor: progress; opacity: .6; }
</style>
</head>
<body>
<h1>{{title}}</h1>
<p>{{description}}</p>
<div class="panes">
  <div class="pane">
    <label for="file">Upload Image or Use Camera</label>
    <div class="drop" id="drop">
      <img id="preview" alt="" hidden>
      <video id="video" autoplay playsinline hidden></video>
      <span id="placeholder">No image selected</span>
    </div>
    <div class="row">
      <input type="file" id="file" accept="image/*">
      <button type="button" id="camera">Use camera</button>
      <button type="button" id="snap" hidden>Capture</button>
      <button type="button" id="clear">Clear</button>
    </div>
    <div class="row"><button type="button" id="submit">Submit</button></div>
  </div>
  <div class="pane">
    <label for="output">Analysis Result</label>
    <textarea id="output" rows="15" readonly></textarea>
  </div>
</div>
<canvas id="canvas" hidden></canvas>
<script>
const $ = (id) => document.getElementById(id);
let image = null;
let stream = null;

function show(blob) {
  image = blob;
  const preview = $("preview");
  if (blob) {
    preview.src = URL.createObjectURL(blob);
    preview.hidden = false;
    $("placeholder").hidden = true;
  } else {
    preview.removeAttribute("src");
    preview.hidden = true;
    $("placeholder").hidden = false;
  }
}

function stopCamera() {
  if (stream) stream.getTracks().forEach((t) => t.stop());
  stream = null;
  $("video").hidden = true;
  $("snap").hidden = true;
}

$("file").addEventListener("change", (e) => {
  stopCamera();
  show(e.target.files[0] || null);
});

$("camera").addEventListener("click", async () => {
  try {
    stream = await navigator.mediaDevices.getUserMedia({ video: true });
  } catch (err) {
    $("output").value = "Camera unavailable: " + err;
    return;
  }
  show(null);
  $("placeholder").hidden = true;
  $("video").srcObject = stream;
  $("video").hidden = false;
  $("snap").hidden = false;
});

$("snap").addEventListener("click", () => {
  const video = $("video");
  const canvas = $("canvas");
  canvas.width = video.videoWidth;
  canvas.height = video.videoHeight;
  canvas.getContext("2d").drawImage(video, 0, 0);
  canvas.toBlob((blob) => { stopCamera(); show(blob); }, "image/jpeg", 0.92);
});

$("clear").addEventListener("click", () => {
  stopCamera();
  $("file").value = "";
  show(null);
  $("output").value = "";
});

$("submit").addEventListener("click", async () => {
  const button = $("submit");
  const form = new FormData();
  if (image) form.append("image", image, image.name || "capture.jpg");
  button.disabled = true;
  $("output").value = "Analyzing…";
  try {
    const res = await fetch("api/analyze", { method: "POST", body: form });
    $("output").value = await res.text();
  } catch (err) {
    $("output").value = "Error analyzing image: " + err;
  } finally {
    button.disabled = false;
  }
});
</script>
</body>
</html>
"#;
