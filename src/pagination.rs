//! Page requests and result pages shared by the repository, service and HTTP layers.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 12;

/// Client attribute a page can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Name,
    Cpf,
    Income,
    BirthDate,
    Children,
}

impl FromStr for SortField {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "cpf" => Ok(SortField::Cpf),
            "income" => Ok(SortField::Income),
            "birthDate" | "birth_date" => Ok(SortField::BirthDate),
            "children" => Ok(SortField::Children),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort field `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Direction::Asc),
            "DESC" => Ok(Direction::Desc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort direction `{other}`"
            ))),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Asc => f.write_str("ASC"),
            Direction::Desc => f.write_str("DESC"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub property: SortField,
    pub direction: Direction,
}

impl Sort {
    pub fn new(property: SortField, direction: Direction) -> Self {
        Self {
            property,
            direction,
        }
    }

    pub fn asc(property: SortField) -> Self {
        Self::new(property, Direction::Asc)
    }

    pub fn desc(property: SortField) -> Self {
        Self::new(property, Direction::Desc)
    }
}

/// Which slice of a result set to fetch and how to order it.
///
/// Ties on the sort field are always broken by ascending id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: usize,
    size: usize,
    sort: Option<Sort>,
}

impl PageRequest {
    /// Creates an unsorted request for the zero-based `page` holding `size` items.
    pub fn of(page: usize, size: usize) -> Result<Self, TypeConstraintError> {
        if size == 0 {
            return Err(TypeConstraintError::InvalidValue(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            page,
            size,
            sort: None,
        })
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// Number of rows to skip before this page starts.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// An immutable slice of results plus the metadata describing where it sits
/// in the full result set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    content: Vec<T>,
    number: usize,
    size: usize,
    sort: Option<Sort>,
    total_elements: usize,
    total_pages: usize,
    number_of_elements: usize,
    first: bool,
    last: bool,
    empty: bool,
}

impl<T> Page<T> {
    /// Builds a page for `request` out of already sliced `content`.
    ///
    /// `total_elements` is the size of the whole result set. Content longer
    /// than the page size is truncated.
    pub fn new(mut content: Vec<T>, request: &PageRequest, total_elements: usize) -> Self {
        content.truncate(request.size());

        let seen = request.offset().saturating_add(content.len());
        let total_elements = if !content.is_empty() && seen > total_elements {
            seen
        } else {
            total_elements
        };

        Self::assemble(
            content,
            request.page(),
            request.size(),
            request.sort(),
            total_elements,
            total_elements.div_ceil(request.size()),
        )
    }

    /// Wraps a complete result set as a single page.
    pub fn unpaged(content: Vec<T>) -> Self {
        let total = content.len();
        Self::assemble(content, 0, total, None, total, 1)
    }

    fn assemble(
        content: Vec<T>,
        number: usize,
        size: usize,
        sort: Option<Sort>,
        total_elements: usize,
        total_pages: usize,
    ) -> Self {
        let number_of_elements = content.len();
        Self {
            empty: content.is_empty(),
            content,
            number,
            size,
            sort,
            total_elements,
            total_pages,
            number_of_elements,
            first: number == 0,
            last: number.saturating_add(1) >= total_pages,
        }
    }

    /// Converts every element while keeping the page metadata untouched.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            sort: self.sort,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn total_elements(&self) -> usize {
        self.total_elements
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn number_of_elements(&self) -> usize {
        self.number_of_elements
    }

    pub fn is_first(&self) -> bool {
        self.first
    }

    pub fn is_last(&self) -> bool {
        self.last
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn has_next(&self) -> bool {
        !self.last
    }
}
