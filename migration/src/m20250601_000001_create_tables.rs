use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 用户表（管理员与学生共用）
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().null().unique_key())
                    .col(ColumnDef::new(Users::StudentId).string().null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().null())
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(ColumnDef::new(Users::State).string().null())
                    .col(ColumnDef::new(Users::District).string().null())
                    .col(ColumnDef::new(Users::Region).string().null())
                    .col(ColumnDef::new(Users::College).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 角色表
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Roles::Description).text().null())
                    .col(ColumnDef::new(Roles::Permissions).text().not_null())
                    .col(
                        ColumnDef::new(Roles::IsSystem)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Roles::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Roles::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 考试表
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exams::Title).string().not_null())
                    .col(ColumnDef::new(Exams::ExamType).string().not_null())
                    .col(ColumnDef::new(Exams::ExamFormat).string().not_null())
                    .col(ColumnDef::new(Exams::TotalMarks).integer().not_null())
                    .col(ColumnDef::new(Exams::Duration).integer().not_null())
                    .col(ColumnDef::new(Exams::StartDate).string().not_null())
                    .col(ColumnDef::new(Exams::StartTime).string().null())
                    .col(ColumnDef::new(Exams::Venue).string().null())
                    .col(ColumnDef::new(Exams::Description).text().null())
                    .col(ColumnDef::new(Exams::Status).string().not_null())
                    .col(ColumnDef::new(Exams::Category).string().not_null())
                    .col(ColumnDef::new(Exams::SetType).string().null())
                    .col(ColumnDef::new(Exams::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Exams::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Exams::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 考试科目表
        manager
            .create_table(
                Table::create()
                    .table(ExamSubjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamSubjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamSubjects::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(ExamSubjects::Subject).string().not_null())
                    .col(ColumnDef::new(ExamSubjects::Marks).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamSubjects::Table, ExamSubjects::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(Questions::QuestionText).text().not_null())
                    .col(ColumnDef::new(Questions::QuestionType).string().not_null())
                    .col(ColumnDef::new(Questions::Difficulty).string().not_null())
                    .col(ColumnDef::new(Questions::Marks).integer().not_null())
                    .col(ColumnDef::new(Questions::Explanation).text().null())
                    .col(ColumnDef::new(Questions::Subject).string().null())
                    .col(ColumnDef::new(Questions::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Questions::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Questions::Table, Questions::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 选项表
        manager
            .create_table(
                Table::create()
                    .table(QuestionOptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuestionOptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(QuestionOptions::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuestionOptions::OptionText).text().not_null())
                    .col(
                        ColumnDef::new(QuestionOptions::IsCorrect)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(QuestionOptions::OptionOrder)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuestionOptions::Table, QuestionOptions::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生考试记录表
        manager
            .create_table(
                Table::create()
                    .table(StudentExams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentExams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentExams::UserId).big_integer().not_null())
                    .col(ColumnDef::new(StudentExams::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(StudentExams::Status).string().not_null())
                    .col(ColumnDef::new(StudentExams::Score).double().null())
                    .col(ColumnDef::new(StudentExams::Percentage).double().null())
                    .col(ColumnDef::new(StudentExams::StartedAt).big_integer().null())
                    .col(ColumnDef::new(StudentExams::CompletedAt).big_integer().null())
                    .col(
                        ColumnDef::new(StudentExams::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentExams::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentExams::Table, StudentExams::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentExams::Table, StudentExams::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 学生分科成绩表，科目被删除时随之删除
        manager
            .create_table(
                Table::create()
                    .table(StudentExamSubjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentExamSubjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentExamSubjects::StudentExamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentExamSubjects::ExamSubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentExamSubjects::Score).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentExamSubjects::Table, StudentExamSubjects::StudentExamId)
                            .to(StudentExams::Table, StudentExams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentExamSubjects::Table, StudentExamSubjects::ExamSubjectId)
                            .to(ExamSubjects::Table, ExamSubjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 公告表
        manager
            .create_table(
                Table::create()
                    .table(Announcements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Announcements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Announcements::Title).string().not_null())
                    .col(ColumnDef::new(Announcements::Content).text().not_null())
                    .col(
                        ColumnDef::new(Announcements::AnnouncementType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Announcements::MediaUrl).string().null())
                    .col(ColumnDef::new(Announcements::VideoUrl).string().null())
                    .col(ColumnDef::new(Announcements::Priority).string().not_null())
                    .col(ColumnDef::new(Announcements::Status).string().not_null())
                    .col(
                        ColumnDef::new(Announcements::TargetAudience)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Announcements::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Announcements::ExpiresAt).big_integer().null())
                    .col(ColumnDef::new(Announcements::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Announcements::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Announcements::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Announcements::Table, Announcements::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 设置表（值为 JSON 文本）
        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settings::Value).text().not_null())
                    .col(ColumnDef::new(Settings::UpdatedBy).big_integer().null())
                    .col(ColumnDef::new(Settings::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 历年真题表
        manager
            .create_table(
                Table::create()
                    .table(PreviousQuestionSets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PreviousQuestionSets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PreviousQuestionSets::Course).string().not_null())
                    .col(
                        ColumnDef::new(PreviousQuestionSets::SubjectMode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PreviousQuestionSets::Subjects).text().not_null())
                    .col(
                        ColumnDef::new(PreviousQuestionSets::ExamConductedOn)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PreviousQuestionSets::ResourceUrl)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PreviousQuestionSets::Notes).text().null())
                    .col(
                        ColumnDef::new(PreviousQuestionSets::UploadedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PreviousQuestionSets::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PreviousQuestionSets::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PreviousQuestionSets::Table, PreviousQuestionSets::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 科目目录表
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Subjects::Code).string().null())
                    .col(ColumnDef::new(Subjects::Description).text().null())
                    .col(ColumnDef::new(Subjects::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Subjects::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 帮助中心：常见问题
        manager
            .create_table(
                Table::create()
                    .table(HelpFaqs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(HelpFaqs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(HelpFaqs::Question).string().not_null())
                    .col(ColumnDef::new(HelpFaqs::Answer).text().not_null())
                    .col(ColumnDef::new(HelpFaqs::Category).string().null())
                    .col(
                        ColumnDef::new(HelpFaqs::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(HelpFaqs::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(HelpFaqs::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 帮助中心：工单
        manager
            .create_table(
                Table::create()
                    .table(SupportTickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupportTickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SupportTickets::UserId).big_integer().not_null())
                    .col(ColumnDef::new(SupportTickets::Subject).string().not_null())
                    .col(ColumnDef::new(SupportTickets::Message).text().not_null())
                    .col(ColumnDef::new(SupportTickets::Status).string().not_null())
                    .col(ColumnDef::new(SupportTickets::AdminResponse).text().null())
                    .col(
                        ColumnDef::new(SupportTickets::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupportTickets::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SupportTickets::Table, SupportTickets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================

        // 同一考试组内（标题、日期、类别、套卷）唯一；set_type 为 NULL 时不冲突
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exams_set_unique")
                    .table(Exams::Table)
                    .col(Exams::Title)
                    .col(Exams::StartDate)
                    .col(Exams::Category)
                    .col(Exams::SetType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_exams_user_exam")
                    .table(StudentExams::Table)
                    .col(StudentExams::UserId)
                    .col(StudentExams::ExamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_exam_subjects_pair")
                    .table(StudentExamSubjects::Table)
                    .col(StudentExamSubjects::StudentExamId)
                    .col(StudentExamSubjects::ExamSubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_state")
                    .table(Users::Table)
                    .col(Users::State)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_subjects_exam_id")
                    .table(ExamSubjects::Table)
                    .col(ExamSubjects::ExamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_exam_id")
                    .table(Questions::Table)
                    .col(Questions::ExamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_question_options_question_id")
                    .table(QuestionOptions::Table)
                    .col(QuestionOptions::QuestionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_exams_completed_at")
                    .table(StudentExams::Table)
                    .col(StudentExams::CompletedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_announcements_status")
                    .table(Announcements::Table)
                    .col(Announcements::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_previous_question_sets_course")
                    .table(PreviousQuestionSets::Table)
                    .col(PreviousQuestionSets::Course)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_support_tickets_user_id")
                    .table(SupportTickets::Table)
                    .col(SupportTickets::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SupportTickets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(HelpFaqs::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PreviousQuestionSets::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Settings::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Announcements::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentExamSubjects::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentExams::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuestionOptions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamSubjects::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    StudentId,
    PasswordHash,
    Role,
    Status,
    FullName,
    Phone,
    State,
    District,
    Region,
    College,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Roles {
    #[sea_orm(iden = "roles")]
    Table,
    Id,
    Name,
    Description,
    Permissions,
    IsSystem,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Exams {
    #[sea_orm(iden = "exams")]
    Table,
    Id,
    Title,
    ExamType,
    ExamFormat,
    TotalMarks,
    Duration,
    StartDate,
    StartTime,
    Venue,
    Description,
    Status,
    Category,
    SetType,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamSubjects {
    #[sea_orm(iden = "exam_subjects")]
    Table,
    Id,
    ExamId,
    Subject,
    Marks,
}

#[derive(DeriveIden)]
enum Questions {
    #[sea_orm(iden = "questions")]
    Table,
    Id,
    ExamId,
    QuestionText,
    QuestionType,
    Difficulty,
    Marks,
    Explanation,
    Subject,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QuestionOptions {
    #[sea_orm(iden = "question_options")]
    Table,
    Id,
    QuestionId,
    OptionText,
    IsCorrect,
    OptionOrder,
}

#[derive(DeriveIden)]
enum StudentExams {
    #[sea_orm(iden = "student_exams")]
    Table,
    Id,
    UserId,
    ExamId,
    Status,
    Score,
    Percentage,
    StartedAt,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentExamSubjects {
    #[sea_orm(iden = "student_exam_subjects")]
    Table,
    Id,
    StudentExamId,
    ExamSubjectId,
    Score,
}

#[derive(DeriveIden)]
enum Announcements {
    #[sea_orm(iden = "announcements")]
    Table,
    Id,
    Title,
    Content,
    AnnouncementType,
    MediaUrl,
    VideoUrl,
    Priority,
    Status,
    TargetAudience,
    Views,
    ExpiresAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Settings {
    #[sea_orm(iden = "settings")]
    Table,
    Key,
    Value,
    UpdatedBy,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PreviousQuestionSets {
    #[sea_orm(iden = "previous_question_sets")]
    Table,
    Id,
    Course,
    SubjectMode,
    Subjects,
    ExamConductedOn,
    ResourceUrl,
    Notes,
    UploadedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
    Code,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum HelpFaqs {
    #[sea_orm(iden = "help_faqs")]
    Table,
    Id,
    Question,
    Answer,
    Category,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SupportTickets {
    #[sea_orm(iden = "support_tickets")]
    Table,
    Id,
    UserId,
    Subject,
    Message,
    Status,
    AdminResponse,
    CreatedAt,
    UpdatedAt,
}
