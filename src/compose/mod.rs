//! Page composer - binds writings and static metadata into page views
//!
//! Every view here is a plain serializable value handed to a template.
//! Nothing in this module renders HTML.

use serde::Serialize;

use crate::config::{SiteConfig, SocialLink};
use crate::content::{by_recency, recent_posts, DisplayPost, Page, Post};
use crate::data::{Project, SiteData, Technology};
use crate::helpers::{post_url, url_for};

/// Identity blurb shown at the top of the home page
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub name: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub socials: Vec<SocialLink>,
}

/// A writing in a list, with its resolved link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WritingItem {
    #[serde(flatten)]
    pub post: DisplayPost,
    pub url: String,
}

/// The home page's four regions
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub identity: Identity,
    pub technologies: Vec<Technology>,
    pub projects: Vec<Project>,
    /// More projects exist than are shown
    pub has_more_projects: bool,
    pub projects_url: String,
    /// Recent writings, newest first
    pub posts: Vec<WritingItem>,
    pub writings_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsView {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WritingsView {
    pub posts: Vec<WritingItem>,
}

/// A single writing with links to its neighbours
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub post: WritingItem,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub content: String,
    pub newer: Option<WritingItem>,
    pub older: Option<WritingItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub technologies: Vec<Technology>,
}

/// Builds page views from the collection and the site data
pub struct Composer<'a> {
    config: &'a SiteConfig,
    data: &'a SiteData,
}

impl<'a> Composer<'a> {
    pub fn new(config: &'a SiteConfig, data: &'a SiteData) -> Self {
        Self { config, data }
    }

    /// Home page: identity, technology grid, bounded project cards and the
    /// most recent writings
    pub fn home(&self, posts: &[Post]) -> HomeView {
        let mut projects: Vec<&Project> = self.data.projects.iter().collect();
        // Stable: featured first, data-file order otherwise
        projects.sort_by_key(|p| !p.featured);

        let limit = self.config.home_projects;

        HomeView {
            identity: self.identity(),
            technologies: self.data.technologies.clone(),
            projects: projects.into_iter().take(limit).cloned().collect(),
            has_more_projects: self.data.projects.len() > limit,
            projects_url: url_for(self.config, "projects/"),
            posts: recent_posts(posts, self.config.recent_posts)
                .into_iter()
                .map(|post| self.writing_item(post))
                .collect(),
            writings_url: url_for(self.config, "writings/"),
        }
    }

    pub fn projects(&self) -> ProjectsView {
        ProjectsView {
            projects: self.data.projects.clone(),
        }
    }

    /// Every writing, newest first
    pub fn writings(&self, posts: &[Post]) -> WritingsView {
        WritingsView {
            posts: by_recency(posts)
                .into_iter()
                .map(|post| self.writing_item(post.display()))
                .collect(),
        }
    }

    /// One writing; `ordered` is the collection newest first
    pub fn post(&self, ordered: &[&Post], index: usize) -> Option<PostView> {
        let post = ordered.get(index)?;
        let neighbour = |i: usize| ordered.get(i).map(|p| self.writing_item(p.display()));

        Some(PostView {
            post: self.writing_item(post.display()),
            description: post.description.clone(),
            tags: post.tags.clone(),
            content: post.content.clone(),
            newer: index.checked_sub(1).and_then(neighbour),
            older: neighbour(index + 1),
        })
    }

    pub fn page(&self, page: &Page) -> PageView {
        let technologies = if page.layout == "about" {
            self.data.technologies.clone()
        } else {
            Vec::new()
        };

        PageView {
            title: page.title.clone(),
            description: page.description.clone(),
            content: page.content.clone(),
            technologies,
        }
    }

    fn identity(&self) -> Identity {
        Identity {
            name: self.config.author.clone(),
            bio: self.config.bio.clone(),
            avatar: self.config.avatar.as_deref().map(|a| {
                if crate::helpers::is_external(a) {
                    a.to_string()
                } else {
                    url_for(self.config, a)
                }
            }),
            socials: self.config.socials.clone(),
        }
    }

    fn writing_item(&self, post: DisplayPost) -> WritingItem {
        let url = post_url(self.config, &post.slug);
        WritingItem { post, url }
    }
}
