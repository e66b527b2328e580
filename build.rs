use std::env;
use std::fs;
use std::path::Path;

const PLACEHOLDER_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Exam Admin - frontend not built</title>
    <style>
        body { font-family: system-ui, sans-serif; max-width: 560px; margin: 96px auto; padding: 16px; }
        .notice { background: #eef4ff; border: 1px solid #c7d7fe; padding: 16px 20px; border-radius: 8px; }
        code { background: #f1f3f4; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>Exam Admin</h1>
    <div class="notice">
        <p>The admin UI bundle was not found when this binary was compiled.</p>
        <p>The API under <code>/api</code> is fully available.</p>
        <p>Build the UI with <code>cd frontend &amp;&amp; npm ci &amp;&amp; npm run build</code>
        and recompile to embed it.</p>
    </div>
</body>
</html>"#;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    // rust-embed 要求目录存在，未构建时写入占位页
    if !dist_path.join("index.html").exists() {
        println!("cargo:warning=frontend/dist not found, embedding placeholder page");
        fs::create_dir_all(&dist_path).expect("Failed to create frontend/dist");
        fs::write(dist_path.join("index.html"), PLACEHOLDER_HTML)
            .expect("Failed to write placeholder index.html");
    }
}
