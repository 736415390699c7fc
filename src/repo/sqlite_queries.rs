pub const QUERY_CREATE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS pet (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR NOT NULL,
    species VARCHAR NOT NULL,
    breed VARCHAR NOT NULL DEFAULT '',
    gender VARCHAR NOT NULL DEFAULT 'unknown',
    birth_date DATE NOT NULL,
    weight_kg REAL NOT NULL DEFAULT 0,
    notes VARCHAR NOT NULL DEFAULT '',
    is_active BOOLEAN NOT NULL DEFAULT 1,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);

CREATE TABLE IF NOT EXISTS daily_routine (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pet(id) ON DELETE CASCADE,
    title VARCHAR NOT NULL,
    routine_type VARCHAR NOT NULL,
    scheduled_time DATETIME NOT NULL,
    duration_min INTEGER NOT NULL DEFAULT 15,
    is_completed BOOLEAN NOT NULL DEFAULT 0,
    completed_at DATETIME,
    status VARCHAR NOT NULL DEFAULT 'pending',
    notes VARCHAR NOT NULL DEFAULT '',
    is_active BOOLEAN NOT NULL DEFAULT 1,
    is_recurring BOOLEAN NOT NULL DEFAULT 0,
    recurring_days VARCHAR NOT NULL DEFAULT '[]',
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);

CREATE TABLE IF NOT EXISTS appointment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pet(id) ON DELETE CASCADE,
    appointment_type VARCHAR NOT NULL,
    title VARCHAR NOT NULL,
    date DATETIME NOT NULL,
    duration_min INTEGER NOT NULL DEFAULT 30,
    location VARCHAR NOT NULL DEFAULT '',
    veterinarian_name VARCHAR NOT NULL DEFAULT '',
    notes VARCHAR NOT NULL DEFAULT '',
    status VARCHAR NOT NULL DEFAULT 'upcoming',
    reminder_minutes_before INTEGER NOT NULL DEFAULT 60,
    cost REAL NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL
);

CREATE TABLE IF NOT EXISTS exercise (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pet(id) ON DELETE CASCADE,
    exercise_type VARCHAR NOT NULL,
    title VARCHAR NOT NULL,
    start_date DATETIME NOT NULL,
    end_date DATETIME NOT NULL,
    duration_min INTEGER NOT NULL DEFAULT 0,
    distance_km REAL NOT NULL DEFAULT 0,
    calories INTEGER NOT NULL DEFAULT 0,
    intensity VARCHAR NOT NULL DEFAULT 'moderate',
    notes VARCHAR NOT NULL DEFAULT '',
    average_speed_kmh REAL NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL
);

CREATE TABLE IF NOT EXISTS health_record (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pet(id) ON DELETE CASCADE,
    record_type VARCHAR NOT NULL,
    title VARCHAR NOT NULL,
    record_date DATETIME NOT NULL,
    veterinarian_name VARCHAR NOT NULL DEFAULT '',
    clinic_name VARCHAR NOT NULL DEFAULT '',
    diagnosis VARCHAR NOT NULL DEFAULT '',
    treatment VARCHAR NOT NULL DEFAULT '',
    notes VARCHAR NOT NULL DEFAULT '',
    cost REAL NOT NULL DEFAULT 0,
    next_appointment DATETIME,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

pub const QUERY_INSERT_PET: &str = r#"
INSERT INTO pet (
    name,species,breed,gender,birth_date,
    weight_kg,notes,is_active,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9,$10);
"#;

pub const QUERY_UPDATE_PET: &str = r#"
UPDATE pet SET
    name=$2,species=$3,breed=$4,gender=$5,birth_date=$6,
    weight_kg=$7,notes=$8,is_active=$9,updated_at=$10
WHERE id=$1;
"#;

pub const QUERY_DELETE_PET: &str = "DELETE FROM pet WHERE id=$1;";

pub const QUERY_GET_ALL_PETS: &str = r#"
SELECT
    id,name,species,breed,gender,birth_date,
    weight_kg,notes,is_active,created_at,updated_at
FROM pet
ORDER BY created_at DESC, id DESC;
"#;

pub const QUERY_GET_PET_BY_ID: &str = r#"
SELECT
    id,name,species,breed,gender,birth_date,
    weight_kg,notes,is_active,created_at,updated_at
FROM pet
WHERE id=$1;
"#;

pub const QUERY_INSERT_ROUTINE: &str = r#"
INSERT INTO daily_routine (
    pet_id,title,routine_type,scheduled_time,duration_min,
    is_completed,completed_at,status,notes,is_active,
    is_recurring,recurring_days,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14);
"#;

pub const QUERY_UPDATE_ROUTINE: &str = r#"
UPDATE daily_routine SET
    title=$3,routine_type=$4,scheduled_time=$5,duration_min=$6,
    is_completed=$7,completed_at=$8,status=$9,notes=$10,is_active=$11,
    is_recurring=$12,recurring_days=$13,updated_at=$14
WHERE id=$1 AND pet_id=$2;
"#;

pub const QUERY_DELETE_ROUTINE: &str = "DELETE FROM daily_routine WHERE id=$1 AND pet_id=$2;";

pub const QUERY_GET_ACTIVE_PET_ROUTINES: &str = r#"
SELECT
    id,pet_id,title,routine_type,scheduled_time,duration_min,
    is_completed,completed_at,status,notes,is_active,
    is_recurring,recurring_days,created_at,updated_at
FROM daily_routine
WHERE pet_id=$1 AND is_active=1
ORDER BY scheduled_time ASC, id ASC;
"#;

pub const QUERY_INSERT_APPOINTMENT: &str = r#"
INSERT INTO appointment (
    pet_id,appointment_type,title,date,duration_min,
    location,veterinarian_name,notes,status,
    reminder_minutes_before,cost,created_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12);
"#;

pub const QUERY_UPDATE_APPOINTMENT: &str = r#"
UPDATE appointment SET
    appointment_type=$3,title=$4,date=$5,duration_min=$6,
    location=$7,veterinarian_name=$8,notes=$9,status=$10,
    reminder_minutes_before=$11,cost=$12
WHERE id=$1 AND pet_id=$2;
"#;

pub const QUERY_DELETE_APPOINTMENT: &str = "DELETE FROM appointment WHERE id=$1 AND pet_id=$2;";

pub const QUERY_GET_PET_APPOINTMENTS: &str = r#"
SELECT
    id,pet_id,appointment_type,title,date,duration_min,
    location,veterinarian_name,notes,status,
    reminder_minutes_before,cost,created_at
FROM appointment
WHERE pet_id=$1
ORDER BY date DESC, id DESC;
"#;

pub const QUERY_INSERT_EXERCISE: &str = r#"
INSERT INTO exercise (
    pet_id,exercise_type,title,start_date,end_date,duration_min,
    distance_km,calories,intensity,notes,average_speed_kmh,created_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12);
"#;

pub const QUERY_UPDATE_EXERCISE: &str = r#"
UPDATE exercise SET
    exercise_type=$3,title=$4,start_date=$5,end_date=$6,duration_min=$7,
    distance_km=$8,calories=$9,intensity=$10,notes=$11,average_speed_kmh=$12
WHERE id=$1 AND pet_id=$2;
"#;

pub const QUERY_DELETE_EXERCISE: &str = "DELETE FROM exercise WHERE id=$1 AND pet_id=$2;";

pub const QUERY_GET_PET_EXERCISES: &str = r#"
SELECT
    id,pet_id,exercise_type,title,start_date,end_date,duration_min,
    distance_km,calories,intensity,notes,average_speed_kmh,created_at
FROM exercise
WHERE pet_id=$1
ORDER BY start_date DESC, id DESC;
"#;

pub const QUERY_INSERT_HEALTH_RECORD: &str = r#"
INSERT INTO health_record (
    pet_id,record_type,title,record_date,veterinarian_name,clinic_name,
    diagnosis,treatment,notes,cost,next_appointment,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13);
"#;

pub const QUERY_UPDATE_HEALTH_RECORD: &str = r#"
UPDATE health_record SET
    record_type=$3,title=$4,record_date=$5,veterinarian_name=$6,clinic_name=$7,
    diagnosis=$8,treatment=$9,notes=$10,cost=$11,next_appointment=$12,updated_at=$13
WHERE id=$1 AND pet_id=$2;
"#;

pub const QUERY_DELETE_HEALTH_RECORD: &str = "DELETE FROM health_record WHERE id=$1 AND pet_id=$2;";

pub const QUERY_GET_PET_HEALTH_RECORDS: &str = r#"
SELECT
    id,pet_id,record_type,title,record_date,veterinarian_name,clinic_name,
    diagnosis,treatment,notes,cost,next_appointment,created_at,updated_at
FROM health_record
WHERE pet_id=$1
ORDER BY record_date DESC, id DESC;
"#;
