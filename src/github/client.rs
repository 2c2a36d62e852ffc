use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ApiSettings;
use crate::domain::RepositoryRef;
use crate::error::{Result, TagActionError};
use crate::github::{qualified_tag_ref, GitRef, GitTagObject, NewTagObject, TagApi};

/// Blocking GitHub REST client for git data endpoints
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Serialize)]
struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    ref_name: String,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateRefRequest<'a> {
    sha: &'a str,
    force: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GitHubClient {
    /// Build a client authenticated with `token`.
    pub fn new(token: &str, settings: &ApiSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| TagActionError::config("Token contains invalid header characters"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut builder = Client::builder()
            .default_headers(headers)
            .user_agent(settings.user_agent.clone());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let base_url = Url::parse(&settings.base_url).map_err(|e| {
            TagActionError::config(format!("Invalid API URL '{}': {}", settings.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TagActionError::config(format!(
                "Invalid API URL '{}': not a base URL",
                settings.base_url
            )));
        }

        Ok(GitHubClient {
            client: builder.build()?,
            base_url,
        })
    }

    /// `{base}/repos/{owner}/{repo}/git/{segments...}`
    ///
    /// Each segment is percent-encoded on its own, so `#`, `?` and `%` in a
    /// name stay part of the path.
    fn repo_url<I>(&self, repo: &RepositoryRef, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TagActionError::config("API URL cannot carry a path"))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.repo.as_str(), "git"])
            .extend(segments);
        Ok(url)
    }

    /// URL of a tag ref under the `ref` (lookup) or `refs` (mutation) endpoint.
    fn tag_ref_url(&self, repo: &RepositoryRef, endpoint: &str, tag: &str) -> Result<Url> {
        self.repo_url(repo, [endpoint, "tags"].into_iter().chain(tag.split('/')))
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "GitHub API response");

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);

        if status == StatusCode::NOT_FOUND {
            return Err(TagActionError::not_found(format!("{} ({})", message, url)));
        }

        warn!(status = status.as_u16(), %url, %message, "GitHub API request failed");
        Err(TagActionError::api(status.as_u16(), message))
    }

    fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status().as_u16();
        let body = response.text()?;
        serde_json::from_str(&body).map_err(|e| {
            TagActionError::api(status, format!("Unexpected response body: {}", e))
        })
    }
}

impl TagApi for GitHubClient {
    fn get_tag_ref(&self, repo: &RepositoryRef, tag: &str) -> Result<GitRef> {
        let url = self.tag_ref_url(repo, "ref", tag)?;
        debug!(%url, "Looking up tag reference");

        let response = self.send(self.client.get(url))?;
        let body: serde_json::Value = Self::json(response)?;

        // A prefix match comes back as a list of refs rather than the exact ref
        if body.is_array() {
            return Err(TagActionError::not_found(format!("tags/{}", tag)));
        }
        serde_json::from_value(body).map_err(|e| {
            TagActionError::api(200, format!("Unexpected reference body: {}", e))
        })
    }

    fn delete_tag_ref(&self, repo: &RepositoryRef, tag: &str) -> Result<u16> {
        let url = self.tag_ref_url(repo, "refs", tag)?;
        debug!(%url, "Deleting tag reference");

        let response = self.send(self.client.delete(url))?;
        Ok(response.status().as_u16())
    }

    fn create_tag_object(
        &self,
        repo: &RepositoryRef,
        tag: &NewTagObject,
    ) -> Result<GitTagObject> {
        let url = self.repo_url(repo, ["tags"])?;
        debug!(%url, tag = %tag.tag, object = %tag.object, "Creating tag object");

        let response = self.send(self.client.post(url).json(tag))?;
        Self::json(response)
    }

    fn create_tag_ref(&self, repo: &RepositoryRef, tag: &str, sha: &str) -> Result<GitRef> {
        let url = self.repo_url(repo, ["refs"])?;
        let body = CreateRefRequest {
            ref_name: qualified_tag_ref(tag),
            sha,
        };
        debug!(%url, ref_name = %body.ref_name, %sha, "Creating tag reference");

        let response = self.send(self.client.post(url).json(&body))?;
        Self::json(response)
    }

    fn update_tag_ref(&self, repo: &RepositoryRef, tag: &str, sha: &str) -> Result<GitRef> {
        let url = self.tag_ref_url(repo, "refs", tag)?;
        let body = UpdateRefRequest { sha, force: true };
        debug!(%url, %sha, "Updating tag reference");

        let response = self.send(self.client.patch(url).json(&body))?;
        Self::json(response)
    }
}
