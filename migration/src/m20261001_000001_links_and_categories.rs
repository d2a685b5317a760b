//! 短链接与分类表迁移
//!
//! 创建以下表：
//! - short_urls: 短链接（带点击计数和最近点击时间）
//! - categories: 分类（带聚合点击计数）
//! - url_categories: 多对多关联表

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShortUrls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShortUrls::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ShortUrls::ShortCode)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ShortUrls::TargetUrl).text().not_null())
                    .col(
                        ColumnDef::new(ShortUrls::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ShortUrls::LastClickedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ShortUrls::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Categories::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Categories::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UrlCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UrlCategories::UrlId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UrlCategories::CategoryId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UrlCategories::UrlId)
                            .col(UrlCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_url_categories_url")
                            .from(UrlCategories::Table, UrlCategories::UrlId)
                            .to(ShortUrls::Table, ShortUrls::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_url_categories_category")
                            .from(UrlCategories::Table, UrlCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 按分类反查链接时使用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_categories_category")
                    .table(UrlCategories::Table)
                    .col(UrlCategories::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_url_categories_category")
                    .table(UrlCategories::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UrlCategories::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ShortUrls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShortUrls {
    Table,
    Id,
    ShortCode,
    TargetUrl,
    ClickCount,
    LastClickedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    ClickCount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UrlCategories {
    Table,
    UrlId,
    CategoryId,
}
