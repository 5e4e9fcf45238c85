//! Demo data for seeding an empty database.
//!
//! Pure data; the binary decides when to insert it.

use chrono::NaiveDate;

use super::requests::{StudentInput, TeacherInput};

/// A demo course without its teacher ID, which is only known after the
/// owning teacher has been inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCourse {
    pub code: &'static str,
    pub name: &'static str,
    pub start_date: NaiveDate,
    pub finish_date: NaiveDate,
}

/// A demo teacher and the courses they teach.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoTeacher {
    pub teacher: TeacherInput,
    pub courses: Vec<DemoCourse>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("demo dates are valid")
}

fn teacher(first: &str, last: &str, number: &str, hired: NaiveDate, salary: f64) -> TeacherInput {
    TeacherInput {
        first_name: first.to_string(),
        last_name: last.to_string(),
        employee_number: number.to_string(),
        hire_date: hired,
        salary,
    }
}

fn fall_2018(code: &'static str, name: &'static str) -> DemoCourse {
    DemoCourse {
        code,
        name,
        start_date: date(2018, 9, 4),
        finish_date: date(2018, 12, 14),
    }
}

fn winter_2019(code: &'static str, name: &'static str) -> DemoCourse {
    DemoCourse {
        code,
        name,
        start_date: date(2019, 1, 8),
        finish_date: date(2019, 4, 27),
    }
}

/// Teachers with their courses, in insertion order.
pub fn demo_teachers() -> Vec<DemoTeacher> {
    vec![
        DemoTeacher {
            teacher: teacher("Alexander", "Bennett", "T378", date(2016, 8, 5), 55.30),
            courses: vec![fall_2018("http5101", "Web Application Development")],
        },
        DemoTeacher {
            teacher: teacher("Caitlin", "Cummings", "T381", date(2014, 6, 10), 62.77),
            courses: vec![
                fall_2018("http5102", "Project Management"),
                winter_2019("http5201", "Security & Quality Assurance"),
            ],
        },
        DemoTeacher {
            teacher: teacher("Linda", "Chan", "T382", date(2015, 8, 22), 60.22),
            courses: vec![winter_2019("http5202", "Web Application Development 2")],
        },
        DemoTeacher {
            teacher: teacher("Lauren", "Smith", "T385", date(2014, 6, 22), 74.20),
            courses: vec![fall_2018("http5103", "Web Programming")],
        },
        DemoTeacher {
            teacher: teacher("Shannon", "Barton", "T397", date(2013, 8, 4), 64.70),
            courses: vec![fall_2018("http5104", "Digital Design")],
        },
        DemoTeacher {
            teacher: teacher("Dana", "Ford", "T401", date(2014, 6, 26), 71.15),
            courses: Vec::new(),
        },
    ]
}

/// Students in insertion order.
pub fn demo_students() -> Vec<StudentInput> {
    let student = |first: &str, last: &str, number: &str, enrolled: Option<NaiveDate>| {
        StudentInput {
            first_name: first.to_string(),
            last_name: last.to_string(),
            student_number: number.to_string(),
            enrol_date: enrolled,
        }
    };

    vec![
        student("Sarah", "Valdez", "N1678", Some(date(2018, 6, 18))),
        student("Jennifer", "Faulkner", "N1679", Some(date(2018, 8, 2))),
        student("Austin", "Simon", "N1682", Some(date(2018, 6, 14))),
        student("Mario", "English", "N1686", Some(date(2018, 7, 3))),
        student("Elizabeth", "Murray", "N1690", Some(date(2018, 7, 12))),
        student("Kevin", "Williams", "N1691", Some(date(2018, 8, 5))),
        student("Jason", "Freeman", "N1694", Some(date(2018, 8, 16))),
        student("Nicole", "Armstrong", "N1695", None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::school::validation::{validate_student, validate_teacher};

    fn today() -> NaiveDate {
        date(2024, 1, 1)
    }

    #[test]
    fn test_demo_teachers_pass_validation() {
        for demo in demo_teachers() {
            assert_eq!(validate_teacher(&demo.teacher, today()), Ok(()));
            for course in &demo.courses {
                assert!(course.start_date <= course.finish_date);
            }
        }
    }

    #[test]
    fn test_demo_students_pass_validation() {
        for student in demo_students() {
            assert_eq!(validate_student(&student, today()), Ok(()));
        }
    }

    #[test]
    fn test_demo_numbers_are_unique() {
        let mut employee_numbers: Vec<String> = demo_teachers()
            .into_iter()
            .map(|d| d.teacher.employee_number)
            .collect();
        employee_numbers.sort();
        employee_numbers.dedup();
        assert_eq!(employee_numbers.len(), demo_teachers().len());

        let mut student_numbers: Vec<String> = demo_students()
            .into_iter()
            .map(|s| s.student_number)
            .collect();
        student_numbers.sort();
        student_numbers.dedup();
        assert_eq!(student_numbers.len(), demo_students().len());
    }
}
