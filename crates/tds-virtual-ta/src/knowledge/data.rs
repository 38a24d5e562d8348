//! Curated TDS course content and forum posts

use super::KnowledgeEntry;

pub(super) fn course_topics() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::course(
            "python_setup",
            "Python setup for TDS: Install Python 3.8+, create virtual environment with 'python -m venv tds_env', activate with 'source tds_env/bin/activate' (Linux/Mac) or 'tds_env\\Scripts\\activate' (Windows), install packages with 'pip install -r requirements.txt'",
            &["python", "setup", "install", "environment", "pip", "venv"],
        ),
        KnowledgeEntry::course(
            "assignments",
            "TDS assignment guidelines: Submit through designated platform, include proper documentation, test code thoroughly, follow naming conventions, use version control. For GA assignments, follow specific model requirements like gpt-3.5-turbo-0125.",
            &["assignment", "submit", "homework", "ga", "deadline", "guidelines"],
        ),
        KnowledgeEntry::course(
            "git_version_control",
            "Git for TDS: Initialize with 'git init', add files with 'git add .', commit with 'git commit -m \"message\"', push to GitHub with 'git push origin main'. Use meaningful commit messages and branches.",
            &["git", "version", "control", "github", "commit", "push", "branch"],
        ),
        KnowledgeEntry::course(
            "api_usage",
            "API usage in TDS: Use proper authentication, implement rate limiting, handle errors gracefully, cache responses when possible. For OpenAI API, use specified models like gpt-3.5-turbo-0125 as required by assignments.",
            &["api", "openai", "gpt", "authentication", "rate", "limiting", "requests"],
        ),
        KnowledgeEntry::course(
            "debugging",
            "Debugging in TDS: Read error messages carefully, use print statements, check syntax and logic, search discourse for similar issues, share errors on forum for help from TAs and peers.",
            &["error", "debug", "fix", "problem", "issue", "troubleshoot"],
        ),
    ]
}

pub(super) fn forum_posts() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::forum(
            "ga5-question-8-clarification",
            "GA5 Question 8 Clarification",
            "https://discourse.onlinedegree.iitm.ac.in/t/ga5-question-8-clarification/155939/4",
            "You must use gpt-3.5-turbo-0125, even if the AI Proxy only supports gpt-4o-mini. Use the OpenAI API directly for this question.",
            &["gpt", "openai", "api", "assignment", "model"],
        ),
        KnowledgeEntry::forum(
            "python-setup",
            "Python Environment Setup",
            "https://discourse.onlinedegree.iitm.ac.in/t/python-setup/156001",
            "Create virtual environment with 'python -m venv tds_env', activate it, install packages with pip. Use Python 3.8 or higher.",
            &["python", "setup", "environment", "virtual", "pip"],
        ),
        KnowledgeEntry::forum(
            "assignment-format",
            "Assignment Submission Format",
            "https://discourse.onlinedegree.iitm.ac.in/t/assignment-format/155654",
            "Include main.py, requirements.txt, README.md with explanation. Use meaningful variable names and comments.",
            &["assignment", "submission", "format", "requirements"],
        ),
    ]
}
