//! Prompt templates for llms.txt generation

use crate::github::RepositoryInfo;

/// Build the analysis prompt from the gathered repository material.
pub fn llms_txt_prompt(repo_url: &str, info: &RepositoryInfo) -> String {
    let mut package_files = String::new();
    for file in &info.package_files {
        package_files.push_str(&format!("\n\n// File: {}\n", file.path));
        package_files.push_str(&file.content);
    }
    if package_files.is_empty() {
        package_files.push_str("(none found)");
    }

    let readme = if info.readme_content.is_empty() {
        "(no README found)"
    } else {
        info.readme_content.as_str()
    };

    format!(
        r###"You are analyzing the repository at {} to produce an llms.txt file.

llms.txt is a plain-text markdown document placed at the root of a website or
repository to give language models a concise, navigable summary of the project.

Format requirements:
- First line: "# <project name>"
- Immediately after: a blockquote ("> ...") with a one-paragraph summary
- Then "##" sections covering what the project does, how the code is laid out,
  and how to get started
- Use markdown links to the most important files where helpful
- Keep it concise: this is an orientation document, not full documentation
- Respond with the llms.txt content only; do not wrap it in code fences

File tree:
{}

README:
{}

Package manifests:
{}
"###,
        repo_url, info.file_tree, readme, package_files
    )
}

/// Build a re-prompt asking the model to repair a document that failed
/// validation, keeping existing content intact.
pub fn fix_prompt(current: &str, issues: &[String]) -> String {
    let issue_list: Vec<String> = issues.iter().map(|i| format!("- {}", i)).collect();
    format!(
        "Here is the current llms.txt:\n\n{}\n\nVALIDATION FAILED:\n{}\n\nPlease fix these issues. Keep all content intact and respond with the corrected document only.",
        current,
        issue_list.join("\n")
    )
}
