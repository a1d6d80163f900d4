//! Minimal robots.txt support: user-agent groups with Allow/Disallow prefixes.

use tscope_core::Fetcher;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Allow(String),
    Disallow(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    agents: Vec<String>,
    rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotsTxt {
    AllowAll,
    DisallowAll,
    Rules(Vec<Group>),
}

/// `TechScopeBot/1.0` out of a full user agent string, lower-cased.
fn product_token(user_agent: &str) -> String {
    let token = user_agent
        .split(|c: char| c == ';' || c == '(' || c == ')' || c.is_whitespace())
        .find(|part| part.to_lowercase().contains("bot"))
        .unwrap_or(user_agent);
    token.split('/').next().unwrap_or(token).to_lowercase()
}

impl RobotsTxt {
    pub fn parse(content: &str) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut current = Group::default();
        let mut in_rules = false;

        for line in content.lines() {
            let line = line.split('#').next().unwrap_or_default().trim();
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match field.trim().to_lowercase().as_str() {
                "user-agent" => {
                    if in_rules {
                        groups.push(std::mem::take(&mut current));
                        in_rules = false;
                    }
                    current.agents.push(value.to_lowercase());
                }
                "allow" if !current.agents.is_empty() => {
                    in_rules = true;
                    current.rules.push(Rule::Allow(value.to_string()));
                }
                "disallow" if !current.agents.is_empty() => {
                    in_rules = true;
                    current.rules.push(Rule::Disallow(value.to_string()));
                }
                _ => {}
            }
        }
        if !current.agents.is_empty() {
            groups.push(current);
        }

        Self::Rules(groups)
    }

    /// Download and parse `/robots.txt` for `base`. 401/403 disallow
    /// everything, other 4xx allow everything, anything else that fails
    /// is treated as disallowed.
    pub async fn fetch(fetcher: &dyn Fetcher, base: &str) -> Self {
        let robots_url = match Url::parse(base).and_then(|b| b.join("/robots.txt")) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid base URL {}: {}", base, e);
                return Self::DisallowAll;
            }
        };

        match fetcher.get(robots_url.as_str()).await {
            Ok(page) if page.is_success() => Self::parse(&page.body),
            Ok(page) if page.status == 401 || page.status == 403 => Self::DisallowAll,
            Ok(page) if (400..500).contains(&page.status) => Self::AllowAll,
            Ok(page) => {
                tracing::warn!("Failed to read {}: HTTP {}", robots_url, page.status);
                Self::DisallowAll
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", robots_url, e);
                Self::DisallowAll
            }
        }
    }

    pub fn is_allowed(&self, user_agent: &str, path: &str) -> bool {
        let groups = match self {
            Self::AllowAll => return true,
            Self::DisallowAll => return false,
            Self::Rules(groups) => groups,
        };

        let token = product_token(user_agent);
        let group = groups
            .iter()
            .find(|g| g.agents.iter().any(|a| a != "*" && token.contains(a.as_str())))
            .or_else(|| groups.iter().find(|g| g.agents.iter().any(|a| a == "*")));

        let Some(group) = group else {
            return true;
        };

        let path = if path.is_empty() { "/" } else { path };
        for rule in &group.rules {
            match rule {
                Rule::Allow(prefix) if path.starts_with(prefix.as_str()) => return true,
                Rule::Disallow(prefix) if prefix.is_empty() => return true,
                Rule::Disallow(prefix) if path.starts_with(prefix.as_str()) => return false,
                _ => {}
            }
        }
        true
    }
}

/// The path (plus query) robots rules are matched against.
pub fn robots_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.query() {
            Some(query) => format!("{}?{}", parsed.path(), query),
            None => parsed.path().to_string(),
        },
        Err(_) => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::mock::MockFetcher;
    use crate::fetcher::USER_AGENT;

    const ROBOTS: &str = "\
# comment
User-agent: GPTBot
Disallow: /

User-agent: techscopebot
Allow: /news/public
Disallow: /news/

User-agent: *
Disallow: /private
Disallow:
";

    #[test]
    fn test_product_token() {
        assert_eq!(product_token(USER_AGENT), "techscopebot");
        assert_eq!(product_token("curl/8.0"), "curl");
    }

    #[test]
    fn test_specific_group_wins() {
        let robots = RobotsTxt::parse(ROBOTS);
        assert!(robots.is_allowed(USER_AGENT, "/"));
        assert!(robots.is_allowed(USER_AGENT, "/news/public/story"));
        assert!(!robots.is_allowed(USER_AGENT, "/news/2024/story"));
        assert!(robots.is_allowed(USER_AGENT, "/private"));
    }

    #[test]
    fn test_wildcard_group() {
        let robots = RobotsTxt::parse(ROBOTS);
        assert!(!robots.is_allowed("OtherCrawler/2.0", "/private/x"));
        assert!(robots.is_allowed("OtherCrawler/2.0", "/news/2024/story"));
    }

    #[test]
    fn test_disallow_root() {
        let robots = RobotsTxt::parse("User-agent: *\nDisallow: /\n");
        assert!(!robots.is_allowed(USER_AGENT, "/"));
        assert!(!robots.is_allowed(USER_AGENT, "/2024/05/story"));
        assert!(RobotsTxt::parse("").is_allowed(USER_AGENT, "/anything"));
    }

    #[test]
    fn test_robots_path() {
        assert_eq!(robots_path("https://example.com/2024/05/a?x=1"), "/2024/05/a?x=1");
        assert_eq!(robots_path("https://example.com"), "/");
    }

    #[tokio::test]
    async fn test_fetch_status_handling() {
        let fetcher = MockFetcher::new()
            .with_page("https://a.example/robots.txt", 404, "")
            .with_page("https://b.example/robots.txt", 403, "")
            .with_page("https://c.example/robots.txt", 503, "")
            .with_page("https://d.example/robots.txt", 200, "User-agent: *\nDisallow: /x\n");

        assert_eq!(RobotsTxt::fetch(&fetcher, "https://a.example/").await, RobotsTxt::AllowAll);
        assert_eq!(RobotsTxt::fetch(&fetcher, "https://b.example/").await, RobotsTxt::DisallowAll);
        assert_eq!(RobotsTxt::fetch(&fetcher, "https://c.example/").await, RobotsTxt::DisallowAll);
        assert_eq!(RobotsTxt::fetch(&fetcher, "https://missing.example/").await, RobotsTxt::DisallowAll);

        let robots = RobotsTxt::fetch(&fetcher, "https://d.example/").await;
        assert!(!robots.is_allowed(USER_AGENT, "/x/y"));
        assert!(robots.is_allowed(USER_AGENT, "/y"));
    }
}
