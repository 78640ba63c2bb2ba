use super::*;
use crate::error::DocError;

fn parser() -> DdlParser {
    DdlParser::new().unwrap()
}

const USER_SQL: &str = r#"
CREATE TABLE `user` (
  `id` int NOT NULL COMMENT 'primary key',
  `name` varchar(32) DEFAULT 'anon' COMMENT 'display name'
) ENGINE=InnoDB DEFAULT CHARSET=utf8 COMMENT='User table';
"#;

const SHOP_SQL: &str = r#"
-- 商城库
SET NAMES utf8mb4;

DROP TABLE IF EXISTS `order`;
CREATE TABLE `order` (
  `id` bigint NOT NULL COMMENT '主键',
  `amount` decimal(10,2) NOT NULL DEFAULT 0.00 COMMENT '金额',
  `remark` varchar(255) DEFAULT NULL COMMENT '备注',
  PRIMARY KEY (`id`),
  KEY `idx_amount` (`amount`)
) ENGINE=InnoDB AUTO_INCREMENT=10 DEFAULT CHARSET=utf8mb4 COMMENT='订单表';

CREATE TABLE `order_item` (
  `id` bigint NOT NULL COMMENT '主键',
  `order_id` bigint NOT NULL COMMENT '订单ID',

  `flag` tinyint(1) NOT NULL DEFAULT '0' COMMENT '标记',
  `created_at` datetime
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COMMENT='订单明细';
"#;

#[test]
fn test_parse_user_table() {
    let tables = parser().parse_script_with(USER_SQL, &mut NoopObserver);

    assert_eq!(
        tables,
        vec![TableRecord {
            name: "user".to_string(),
            comment: "User table".to_string(),
            fields: vec![
                FieldRecord {
                    name: "id".to_string(),
                    data_type: "int".to_string(),
                    default_value: None,
                    nullable: false,
                    comment: Some("primary key".to_string()),
                },
                FieldRecord {
                    name: "name".to_string(),
                    data_type: "varchar(32)".to_string(),
                    default_value: Some("'anon'".to_string()),
                    nullable: true,
                    comment: Some("display name".to_string()),
                },
            ],
        }]
    );
}

#[test]
fn test_extract_blocks_in_order() {
    let blocks = parser().extract_table_blocks(SHOP_SQL);
    let names: Vec<&str> = blocks.iter().map(|b| b.name).collect();
    assert_eq!(names, vec!["order", "order_item"]);
    assert_eq!(blocks[0].comment, "订单表");
    assert_eq!(blocks[1].comment, "订单明细");
    // 正文在只包含 `)` 的行处结束，decimal(10,2) 不会截断正文
    assert!(blocks[0].body.contains("KEY `idx_amount`"));
    assert!(!blocks[0].body.contains("ENGINE"));
}

#[test]
fn test_parse_multiple_tables() {
    let tables = parser().parse_script_with(SHOP_SQL, &mut NoopObserver);
    assert_eq!(tables.len(), 2);

    let order = &tables[0];
    let names: Vec<&str> = order.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "amount", "remark"]);

    let amount = &order.fields[1];
    // 类型中的空白和逗号全部去掉，多参数类型的逗号也不例外
    assert_eq!(amount.data_type, "decimal(102)");
    assert_eq!(amount.default_value.as_deref(), Some("0.00"));
    assert!(!amount.nullable);
    assert_eq!(amount.comment.as_deref(), Some("金额"));

    let remark = &order.fields[2];
    assert_eq!(remark.data_type, "varchar(255)");
    assert_eq!(remark.default_value.as_deref(), Some("NULL"));
    assert!(remark.nullable);

    let item = &tables[1];
    let names: Vec<&str> = item.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["id", "order_id", "flag", "created_at"]);

    let created_at = &item.fields[3];
    assert_eq!(created_at.data_type, "datetime");
    assert!(created_at.nullable);
    assert_eq!(created_at.default_value, None);
    assert_eq!(created_at.comment, None);
}

#[test]
fn test_parse_is_idempotent() {
    let parser = parser();
    let first = parser.parse_script_with(SHOP_SQL, &mut NoopObserver);
    let second = parser.parse_script_with(SHOP_SQL, &mut NoopObserver);
    assert_eq!(first, second);
}

#[test]
fn test_no_tables_is_empty() {
    let parser = parser();
    assert!(parser.parse_script("").is_empty());
    assert!(parser.parse_script("SELECT 1;\n").is_empty());

    // 没有 ENGINE/COMMENT 的建表语句不符合表块格式
    let sql = "CREATE TABLE `t` (\n  `id` int\n);\n";
    assert!(parser.parse_script(sql).is_empty());
}

#[test]
fn test_malformed_trailing_block_is_excluded() {
    let sql = format!("{USER_SQL}\nCREATE TABLE `broken` (\n  `id` int NOT NULL\n);\n");
    let tables = parser().parse_script_with(&sql, &mut NoopObserver);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "user");
}

#[test]
fn test_malformed_leading_block_is_absorbed() {
    // 非贪婪匹配从第一个 CREATE TABLE 开始，一直延伸到下一个合法表块的结尾
    let sql = format!("CREATE TABLE `broken` (\n  `x` int\n);\n{USER_SQL}");
    let tables = parser().parse_script_with(&sql, &mut NoopObserver);
    assert_eq!(tables.len(), 1);

    let table = &tables[0];
    assert_eq!(table.name, "broken");
    assert_eq!(table.comment, "User table");
    let names: Vec<&str> = table.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["x", "id", "name"]);
}

#[test]
fn test_empty_table_comment() {
    let sql = "CREATE TABLE `t` (\n  `id` int\n) ENGINE=InnoDB COMMENT='';\n";
    let tables = parser().parse_script_with(sql, &mut NoopObserver);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].comment, "");
    assert_eq!(tables[0].fields.len(), 1);
}

#[test]
fn test_crlf_script() {
    let sql = USER_SQL.replace('\n', "\r\n");
    let tables = parser().parse_script_with(&sql, &mut NoopObserver);
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].fields.len(), 2);
    assert_eq!(tables[0].fields[1].comment.as_deref(), Some("display name"));
}

#[test]
fn test_non_field_lines_are_skipped() {
    let parser = parser();
    for line in [
        "",
        "    ",
        "  PRIMARY KEY (`id`),",
        "  UNIQUE KEY `uk_name` (`name`),",
        "  KEY `idx_a` (`a`)",
        "  CONSTRAINT `fk` FOREIGN KEY (`a`) REFERENCES `b` (`id`)",
        "id int NOT NULL,",
    ] {
        assert_eq!(parser.parse_field_line(line), None, "line: {line:?}");
    }
}

#[test]
fn test_field_line_with_all_clauses() {
    let field = parser()
        .parse_field_line("  `flag` tinyint(1) NOT NULL DEFAULT '0' COMMENT '标记',")
        .unwrap();
    assert_eq!(field.name, "flag");
    assert_eq!(field.data_type, "tinyint(1)");
    assert_eq!(field.default_value.as_deref(), Some("'0'"));
    assert!(!field.nullable);
    assert_eq!(field.comment.as_deref(), Some("标记"));
}

#[test]
fn test_not_null_inversion() {
    let parser = parser();
    let not_null = parser.parse_field_line("`a` int NOT  NULL,").unwrap();
    assert!(!not_null.nullable);
    assert_eq!(not_null.data_type, "int");

    let nullable = parser.parse_field_line("`a` int,").unwrap();
    assert!(nullable.nullable);
    assert_eq!(nullable.data_type, "int");
}

#[test]
fn test_comment_is_stripped_before_other_clauses() {
    let parser = parser();

    let field = parser
        .parse_field_line("`a` int COMMENT 'DEFAULT 5 here',")
        .unwrap();
    assert_eq!(field.default_value, None);
    assert_eq!(field.comment.as_deref(), Some("DEFAULT 5 here"));
    assert_eq!(field.data_type, "int");

    let field = parser
        .parse_field_line("`b` varchar(8) COMMENT 'NOT NULL in legacy',")
        .unwrap();
    assert!(field.nullable);
    assert_eq!(field.data_type, "varchar(8)");
}

#[test]
fn test_empty_comment_is_not_absent() {
    let field = parser().parse_field_line("`a` int COMMENT '',").unwrap();
    assert_eq!(field.comment.as_deref(), Some(""));
}

#[test]
fn test_default_at_line_end_is_not_recognized() {
    // DEFAULT 的值后面必须有空白
    let field = parser().parse_field_line("`d` int DEFAULT 0,").unwrap();
    assert_eq!(field.default_value, None);
    assert_eq!(field.data_type, "intDEFAULT0");
}

#[test]
fn test_observer_events() {
    let mut observer = RecordingObserver::new();
    parser().parse_script_with(USER_SQL, &mut observer);

    assert_eq!(
        observer.events,
        vec![
            ParseEvent::TablesFound(1),
            ParseEvent::TableStarted("user".to_string()),
            ParseEvent::FieldParsed {
                table: "user".to_string(),
                field: "id".to_string(),
            },
            ParseEvent::FieldParsed {
                table: "user".to_string(),
                field: "name".to_string(),
            },
            ParseEvent::TableFinished {
                table: "user".to_string(),
                field_count: 2,
            },
        ]
    );
    assert_eq!(observer.field_counts(), vec![("user".to_string(), 2)]);
}

#[test]
fn test_read_missing_script() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sql");
    let err = read_sql_script(&path).unwrap_err();
    assert!(matches!(err, DocError::InputNotFound(p) if p == path));
}

#[test]
fn test_parse_sql_file_strips_bom() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.sql");
    std::fs::write(&path, format!("\u{feff}{}", USER_SQL.trim_start())).unwrap();

    let tables = parse_sql_file(&path, &mut NoopObserver).unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "user");
}
