//! 预导入模块，方便使用

pub use super::announcements::{
    ActiveModel as AnnouncementActiveModel, Entity as Announcements, Model as AnnouncementModel,
};
pub use super::exam_subjects::{
    ActiveModel as ExamSubjectActiveModel, Entity as ExamSubjects, Model as ExamSubjectModel,
};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams, Model as ExamModel};
pub use super::help_faqs::{ActiveModel as HelpFaqActiveModel, Entity as HelpFaqs, Model as HelpFaqModel};
pub use super::previous_question_sets::{
    ActiveModel as PreviousQuestionSetActiveModel, Entity as PreviousQuestionSets,
    Model as PreviousQuestionSetModel,
};
pub use super::question_options::{
    ActiveModel as QuestionOptionActiveModel, Entity as QuestionOptions,
    Model as QuestionOptionModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::roles::{ActiveModel as RoleActiveModel, Entity as Roles, Model as RoleModel};
pub use super::settings::{ActiveModel as SettingActiveModel, Entity as Settings, Model as SettingModel};
pub use super::student_exam_subjects::{
    ActiveModel as StudentExamSubjectActiveModel, Entity as StudentExamSubjects,
    Model as StudentExamSubjectModel,
};
pub use super::student_exams::{
    ActiveModel as StudentExamActiveModel, Entity as StudentExams, Model as StudentExamModel,
};
pub use super::subjects::{ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel};
pub use super::support_tickets::{
    ActiveModel as SupportTicketActiveModel, Entity as SupportTickets,
    Model as SupportTicketModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
