//! Movie list decoding and table rendering.

use super::{SiteError, SiteResult, escape_html};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One movie as returned by `/api/list-movies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published: i64,
    #[serde(default)]
    pub deleted: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<i64>,
}

impl Movie {
    pub fn is_published(&self) -> bool {
        self.published > 0
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted > 0
    }
}

/// Body of a `/api/list-movies` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMoviesResponse {
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub movies: Vec<Movie>,
}

impl ListMoviesResponse {
    /// Decode the response, turning a server-flagged error into `Err`.
    pub fn parse(json: &str) -> SiteResult<Vec<Movie>> {
        let response: Self = serde_json::from_str(json)?;
        if response.error {
            return Err(SiteError::Api {
                message: response.message.unwrap_or_default(),
            });
        }
        Ok(response.movies)
    }
}

/// The four tables on the movie list page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieTables {
    pub published: Vec<Movie>,
    pub unpublished: Vec<Movie>,
    pub deleted: Vec<Movie>,
    pub course: Vec<Movie>,
}

impl MovieTables {
    /// DOM ids of the divs the tables are written into, in field order.
    pub const DIV_IDS: [&'static str; 4] = [
        "your-published-movies",
        "your-unpublished-movies",
        "your-deleted-movies",
        "course-movies",
    ];

    /// Sort movies into the user's own published, unpublished and deleted
    /// movies, plus every movie of the user's primary course. A movie can
    /// appear in both an "own" table and the course table.
    pub fn partition(movies: &[Movie], user_id: i64, primary_course_id: Option<i64>) -> Self {
        let mut tables = Self::default();
        for movie in movies {
            if movie.user_id == Some(user_id) {
                match (movie.published, movie.deleted) {
                    (1, _) => tables.published.push(movie.clone()),
                    (0, 0) => tables.unpublished.push(movie.clone()),
                    (0, 1) => tables.deleted.push(movie.clone()),
                    _ => {}
                }
            }
            if primary_course_id.is_some() && movie.course_id == primary_course_id {
                tables.course.push(movie.clone());
            }
        }
        tables
    }

    /// `(div id, table html)` for every table.
    pub fn render(&self) -> [(&'static str, String); 4] {
        [
            (Self::DIV_IDS[0], render_table(&self.published)),
            (Self::DIV_IDS[1], render_table(&self.unpublished)),
            (Self::DIV_IDS[2], render_table(&self.deleted)),
            (Self::DIV_IDS[3], render_table(&self.course)),
        ]
    }
}

fn text_cell(out: &mut String, id: i64, name: &str, text: Option<&str>) {
    let _ = writeln!(
        out,
        "<td> <span id='{id}-{name}'> {} </span> <span class='editor' x-target='{id}-{name}'> ✏️ </span> </td>",
        escape_html(text.unwrap_or_default())
    );
}

fn checkbox_cell(out: &mut String, id: i64, name: &str, value: i64) {
    let checked = if value > 0 { "checked" } else { "" };
    let _ = writeln!(
        out,
        "<td> <input id='{id}-{name}' class='movie-flag' x-movie_id='{id}' x-property='{name}' type='checkbox' {checked}> </td>"
    );
}

/// HTML table listing `movies`, with editable title/description cells and
/// published/deleted checkboxes.
pub fn render_table(movies: &[Movie]) -> String {
    let mut out = String::from("<table>");
    out.push_str(
        "<tr><th>id</th><th>title</th><th>description</th><th>published</th><th>delete?</th></tr>",
    );

    if movies.is_empty() {
        out.push_str("<tr><td colspan=\"5\"><i>No movies</i></td></tr>");
    }
    for movie in movies {
        let _ = write!(out, "<tr><td> {} </td>", movie.id);
        text_cell(&mut out, movie.id, "title", movie.title.as_deref());
        text_cell(&mut out, movie.id, "description", movie.description.as_deref());
        checkbox_cell(&mut out, movie.id, "published", movie.published);
        checkbox_cell(&mut out, movie.id, "deleted", movie.deleted);
        out.push_str("</tr>\n");
    }

    out.push_str("</table>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, user_id: i64, course_id: i64, published: i64, deleted: i64) -> Movie {
        Movie {
            id,
            title: Some(format!("movie {id}")),
            description: None,
            published,
            deleted,
            user_id: Some(user_id),
            course_id: Some(course_id),
        }
    }

    #[test]
    fn test_parse_response() {
        let movies = ListMoviesResponse::parse(
            r#"{"error":false,"movies":[{"id":1,"title":"a","description":"b","published":1,"deleted":0,"user_id":5,"course_id":9}]}"#,
        )
        .unwrap();
        assert_eq!(movies.len(), 1);
        assert!(movies[0].is_published());
        assert!(!movies[0].is_deleted());
    }

    #[test]
    fn test_parse_error_response() {
        let err = ListMoviesResponse::parse(r#"{"error":true,"message":"Invalid api_key"}"#).unwrap_err();
        assert_eq!(err.to_string(), "error: Invalid api_key");
    }

    #[test]
    fn test_partition() {
        let movies = vec![
            movie(1, 5, 9, 1, 0),
            movie(2, 5, 9, 0, 0),
            movie(3, 5, 8, 0, 1),
            movie(4, 6, 9, 1, 0),
            movie(5, 6, 8, 0, 0),
        ];
        fn ids(list: &[Movie]) -> Vec<i64> {
            list.iter().map(|m| m.id).collect()
        }

        let tables = MovieTables::partition(&movies, 5, Some(9));
        assert_eq!(ids(&tables.published), vec![1]);
        assert_eq!(ids(&tables.unpublished), vec![2]);
        assert_eq!(ids(&tables.deleted), vec![3]);
        assert_eq!(ids(&tables.course), vec![1, 2, 4]);
    }

    #[test]
    fn test_partition_without_course() {
        let movies = vec![movie(1, 6, 9, 1, 0)];
        let tables = MovieTables::partition(&movies, 5, None);
        assert!(tables.course.is_empty());
        assert!(tables.published.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let html = render_table(&[]);
        assert!(html.starts_with("<table><tr><th>id</th>"));
        assert!(html.contains("<td colspan=\"5\"><i>No movies</i></td>"));
        assert!(html.ends_with("</table>"));
    }

    #[test]
    fn test_table_rows() {
        let html = render_table(&[movie(7, 5, 9, 1, 0)]);
        assert!(html.contains("<tr><td> 7 </td>"));
        assert!(html.contains("<span id='7-title'> movie 7 </span>"));
        assert!(html.contains("<span id='7-description'>  </span>"));
        assert!(html.contains("x-property='published' type='checkbox' checked>"));
        assert!(html.contains("x-property='deleted' type='checkbox' >"));
        assert!(!html.contains("No movies"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let mut m = movie(1, 5, 9, 0, 0);
        m.title = Some("<img src=x>".to_string());
        assert!(render_table(&[m]).contains("&lt;img src=x&gt;"));
    }

    #[test]
    fn test_render_targets() {
        let tables = MovieTables::default();
        let rendered = tables.render();
        assert_eq!(rendered[0].0, "your-published-movies");
        assert_eq!(rendered[3].0, "course-movies");
    }
}
