use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Account {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    ResetToken,
    ResetRequestedAt,
    Locale,
    CreatedAt,
}
