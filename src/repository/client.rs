use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::get_connection,
    domain::{
        client::{Client, NewClient, UpdateClient},
        types::ClientId,
    },
    models::client::{
        Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
    },
    pagination::{Direction, Page, PageRequest, SortField},
    repository::{
        ClientFilter, ClientReader, ClientWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::clients,
};

type ClientQuery = clients::BoxedQuery<'static, Sqlite>;

const LIKE_ESCAPE: char = '\\';

/// Escapes `LIKE` wildcards so the input is matched literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Maps a filter onto an unordered `SELECT` over `clients`.
fn filtered(filter: &ClientFilter) -> ClientQuery {
    let query = clients::table.into_boxed();
    match filter {
        ClientFilter::All => query,
        ClientFilter::Cpf(cpf) => query.filter(clients::cpf.eq(cpf.clone())),
        ClientFilter::CpfLike(pattern) => query.filter(clients::cpf.like(pattern.clone())),
        ClientFilter::CpfStartingWith(prefix) => query.filter(
            clients::cpf
                .like(format!("{}%", escape_like(prefix)))
                .escape(LIKE_ESCAPE),
        ),
        ClientFilter::Income(income) => query.filter(clients::income.eq(*income)),
        ClientFilter::IncomeGreaterThan(threshold) => {
            query.filter(clients::income.gt(*threshold))
        }
    }
}

/// Orders by the requested field, breaking ties by ascending id.
fn ordered(query: ClientQuery, request: &PageRequest) -> ClientQuery {
    let Some(sort) = request.sort() else {
        return query.order_by(clients::id.asc());
    };

    let query = match (sort.property, sort.direction) {
        (SortField::Id, Direction::Asc) => return query.order_by(clients::id.asc()),
        (SortField::Id, Direction::Desc) => return query.order_by(clients::id.desc()),
        (SortField::Name, Direction::Asc) => query.order_by(clients::name.asc()),
        (SortField::Name, Direction::Desc) => query.order_by(clients::name.desc()),
        (SortField::Cpf, Direction::Asc) => query.order_by(clients::cpf.asc()),
        (SortField::Cpf, Direction::Desc) => query.order_by(clients::cpf.desc()),
        (SortField::Income, Direction::Asc) => query.order_by(clients::income.asc()),
        (SortField::Income, Direction::Desc) => query.order_by(clients::income.desc()),
        (SortField::BirthDate, Direction::Asc) => query.order_by(clients::birth_date.asc()),
        (SortField::BirthDate, Direction::Desc) => query.order_by(clients::birth_date.desc()),
        (SortField::Children, Direction::Asc) => query.order_by(clients::children.asc()),
        (SortField::Children, Direction::Desc) => query.order_by(clients::children.desc()),
    };

    query.then_order_by(clients::id.asc())
}

/// Bounds past what SQLite can address select nothing more, so they are clamped.
fn to_sql_bound(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl DieselRepository {
    /// Every matching client in id order.
    fn list_matching(&self, filter: &ClientFilter) -> RepositoryResult<Vec<Client>> {
        let mut conn = get_connection(self.pool())?;

        let items = filtered(filter)
            .order_by(clients::id.asc())
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(items)
    }

    /// One page of matching clients; the count and the slice come from the
    /// same transaction.
    fn page_matching(
        &self,
        filter: &ClientFilter,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        let limit = to_sql_bound(request.size());
        let offset = to_sql_bound(request.offset());

        let mut conn = get_connection(self.pool())?;

        let (total, rows) = conn.transaction::<_, RepositoryError, _>(|conn| {
            let total: i64 = filtered(filter).count().get_result(conn)?;
            let rows = ordered(filtered(filter), request)
                .limit(limit)
                .offset(offset)
                .load::<DbClient>(conn)?;
            Ok((total, rows))
        })?;

        let items = rows.into_iter().map(Into::into).collect();

        Ok(Page::new(items, request, total as usize))
    }
}

impl ClientReader for DieselRepository {
    fn find_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = get_connection(self.pool())?;

        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn find_client_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Client>> {
        let mut conn = get_connection(self.pool())?;

        let client = filtered(&ClientFilter::Cpf(cpf.to_string()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn find_all_clients(&self) -> RepositoryResult<Vec<Client>> {
        self.list_matching(&ClientFilter::All)
    }

    fn find_all_clients_paged(&self, request: &PageRequest) -> RepositoryResult<Page<Client>> {
        self.page_matching(&ClientFilter::All, request)
    }

    fn find_by_income_greater_than(&self, threshold: f64) -> RepositoryResult<Vec<Client>> {
        self.list_matching(&ClientFilter::IncomeGreaterThan(threshold))
    }

    fn find_by_income_greater_than_paged(
        &self,
        threshold: f64,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        self.page_matching(&ClientFilter::IncomeGreaterThan(threshold), request)
    }

    fn find_by_cpf_like(&self, pattern: &str) -> RepositoryResult<Vec<Client>> {
        self.list_matching(&ClientFilter::CpfLike(pattern.to_string()))
    }

    fn find_by_cpf_like_paged(
        &self,
        pattern: &str,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        self.page_matching(&ClientFilter::CpfLike(pattern.to_string()), request)
    }

    fn find_by_cpf_starting_with(&self, prefix: &str) -> RepositoryResult<Vec<Client>> {
        self.list_matching(&ClientFilter::CpfStartingWith(prefix.to_string()))
    }

    fn find_by_cpf_starting_with_paged(
        &self,
        prefix: &str,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        self.page_matching(&ClientFilter::CpfStartingWith(prefix.to_string()), request)
    }

    fn find_by_income_paged(
        &self,
        income: f64,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        self.page_matching(&ClientFilter::Income(income), request)
    }

    fn count_clients(&self) -> RepositoryResult<usize> {
        let mut conn = get_connection(self.pool())?;
        let total: i64 = clients::table.count().get_result(&mut conn)?;
        Ok(total as usize)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut conn = get_connection(self.pool())?;
        let insertable: DbNewClient = new_client.into();

        let created = diesel::insert_into(clients::table)
            .values(&insertable)
            .get_result::<DbClient>(&mut conn)?;

        Ok(created.into())
    }

    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client> {
        let mut conn = get_connection(self.pool())?;
        let db_updates: DbUpdateClient = updates.into();

        let updated = diesel::update(clients::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbClient>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_client(&self, client: &Client) -> RepositoryResult<()> {
        let id = ClientId::new(client.id)?;
        self.delete_client_by_id(id)
    }

    fn delete_client_by_id(&self, id: ClientId) -> RepositoryResult<()> {
        let mut conn = get_connection(self.pool())?;

        let affected = diesel::delete(clients::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn delete_client_by_cpf(&self, cpf: &str) -> RepositoryResult<()> {
        let mut conn = get_connection(self.pool())?;

        diesel::delete(clients::table.filter(clients::cpf.eq(cpf))).execute(&mut conn)?;
        Ok(())
    }

    fn delete_by_income_greater_than(&self, threshold: f64) -> RepositoryResult<usize> {
        let mut conn = get_connection(self.pool())?;

        let affected = diesel::delete(clients::table.filter(clients::income.gt(threshold)))
            .execute(&mut conn)?;
        log::info!("Removed {affected} client(s) with income above {threshold}");
        Ok(affected)
    }

    fn delete_all_clients(&self) -> RepositoryResult<usize> {
        let mut conn = get_connection(self.pool())?;

        let affected = diesel::delete(clients::table).execute(&mut conn)?;
        log::info!("Removed all {affected} client(s)");
        Ok(affected)
    }
}
