use crate::presentation;
use crate::types::TemplateKind;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

/// Files written into a fresh project, relative to its root.
fn template_files(template: TemplateKind, name: &str) -> Vec<(&'static str, String)> {
    match template {
        TemplateKind::Python => vec![
            ("requirements.txt", "acontext\n".to_string()),
            (
                "main.py",
                format!(
                    "from acontext import AcontextClient\n\n\ndef main():\n    client = AcontextClient()\n    print(\"{} is ready\", client)\n\n\nif __name__ == \"__main__\":\n    main()\n",
                    name
                ),
            ),
            (".gitignore", "__pycache__/\n.venv/\n.env\n".to_string()),
        ],
        TemplateKind::Typescript => vec![
            (
                "package.json",
                format!(
                    "{{\n  \"name\": \"{}\",\n  \"private\": true,\n  \"type\": \"module\",\n  \"dependencies\": {{\n    \"@acontext/acontext\": \"latest\"\n  }}\n}}\n",
                    name
                ),
            ),
            (
                "index.ts",
                format!(
                    "import {{ AcontextClient }} from \"@acontext/acontext\";\n\nconst client = new AcontextClient();\nconsole.log(\"{} is ready\", client);\n",
                    name
                ),
            ),
            (".gitignore", "node_modules/\ndist/\n.env\n".to_string()),
        ],
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("project name must not be empty");
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        bail!("invalid project name: {}", name);
    }
    Ok(())
}

pub fn handle(name: &str, template: TemplateKind, dir: &Path) -> Result<()> {
    let project_dir = scaffold(name, template, dir)?;
    presentation::print_created(&project_dir, &template.to_string());
    Ok(())
}

/// Create `<dir>/<name>` and write the template files into it.
pub fn scaffold(name: &str, template: TemplateKind, dir: &Path) -> Result<PathBuf> {
    validate_name(name)?;

    let project_dir = dir.join(name);
    if project_dir.exists() {
        bail!("directory already exists: {}", project_dir.display());
    }

    fs::create_dir_all(&project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;

    for (file, content) in template_files(template, name) {
        let path = project_dir.join(file);
        fs::write(&path, content).with_context(|| format!("failed to write {}", path.display()))?;
    }

    tracing::debug!(path = %project_dir.display(), %template, "project scaffolded");
    Ok(project_dir)
}
